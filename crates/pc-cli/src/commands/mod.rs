pub mod auth;
pub mod check;
pub mod clear;
pub mod contains;
pub mod dispatch;
pub mod form;
pub mod history;
pub mod plot;
pub mod watch;

mod shared;
