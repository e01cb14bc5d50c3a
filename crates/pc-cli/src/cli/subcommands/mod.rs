pub mod auth;
pub mod form;

pub use auth::AuthCommands;
pub use form::FormCommands;
