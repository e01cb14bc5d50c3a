//! # pc-history
//!
//! The user's checked points, newest first, kept in step with the backend.
//!
//! [`HistoryStore`] publishes immutable [`Snapshot`]s on a watch channel. It
//! gets its bearer token from the session on every call, ends the session on
//! a 401, and empties itself when the session ends.

mod error;
mod poller;
mod store;

pub use error::HistoryError;
pub use poller::{DEFAULT_POLL_INTERVAL, PollerHandle};
pub use store::{HistoryStore, Snapshot};
