//! # pc-auth
//!
//! Client-side session lifecycle for pointcheck.
//!
//! A [`SessionManager`] is one tab's view of the session. It signs in and out
//! through the backend, keeps the token in shared storage, and polices that
//! token: a value it did not write, a removed value, or an expired value ends
//! the session with a distinguishing [`LogoutReason`]. The watchdog runs those
//! checks periodically and on cross-tab change events.

pub mod clock;
pub mod error;
pub mod navigation;
pub mod password;
pub mod session;
pub mod token;
pub mod watchdog;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, TokenError};
pub use navigation::{LogoutReason, Navigator, View, ViewTracker};
pub use password::digest_password;
pub use session::{BearerSource, LogoutHook, Session, SessionManager, SessionState};
pub use token::TokenClaims;
pub use watchdog::{DEFAULT_CHECK_INTERVAL, WatchdogHandle};
