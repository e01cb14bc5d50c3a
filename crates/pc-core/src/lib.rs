//! # pc-core
//!
//! Core types, region geometry, and plot rendering for pointcheck.
//!
//! This crate has no I/O. It provides:
//! - The membership test for the R-scaled composite region ([`geometry`])
//! - Input bounds and the validated [`CheckRequest`] ([`input`])
//! - Point records as sent by the backend and as kept in history ([`point`])
//! - The region's drawable shape for a given R ([`region`])
//! - The plot coordinate transform and the SVG document renderer ([`plot`])

pub mod errors;
pub mod geometry;
pub mod input;
pub mod plot;
pub mod point;
pub mod region;

pub use errors::InputError;
pub use geometry::contains;
pub use input::{CheckRequest, FormSnapshot};
pub use point::{CheckTime, Point, PointRecord};
pub use region::RegionShape;
