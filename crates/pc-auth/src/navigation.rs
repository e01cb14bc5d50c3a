//! Where the user is, and why they were sent to the login view.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to log out, optionally with a message to show.
    UserRequested(Option<String>),
    /// The token's `exp` has passed.
    Expired,
    /// The stored token differs from the one this tab wrote.
    Tampered,
    /// Another tab removed the token.
    RemovedElsewhere,
    /// The backend answered 401.
    Rejected,
}

impl LogoutReason {
    /// Short machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UserRequested(_) => "user",
            Self::Expired => "expired",
            Self::Tampered => "tampered",
            Self::RemovedElsewhere => "removed-elsewhere",
            Self::Rejected => "rejected",
        }
    }

    /// Message shown on the login view.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::UserRequested(Some(message)) => message.clone(),
            Self::UserRequested(None) => "You have been logged out.".into(),
            Self::Expired => {
                "Your session has expired. You have been logged out automatically.".into()
            }
            Self::Tampered => {
                "Your session was changed. You have been logged out automatically.".into()
            }
            Self::RemovedElsewhere => "You were logged out in another tab.".into(),
            Self::Rejected => "The server rejected your session. Please log in again.".into(),
        }
    }

    /// Whether the session ended without the user asking for it.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        !matches!(self, Self::UserRequested(_))
    }
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Main,
}

/// Receives navigation requests from the session.
pub trait Navigator: Send + Sync {
    fn current(&self) -> View;

    /// Show `view`. `reason` is set when the login view is shown because a
    /// session ended.
    fn navigate(&self, view: View, reason: Option<&LogoutReason>);
}

/// Navigator that just remembers the current view and the last notice.
#[derive(Debug)]
pub struct ViewTracker {
    state: Mutex<(View, Option<LogoutReason>)>,
}

impl Default for ViewTracker {
    fn default() -> Self {
        Self {
            state: Mutex::new((View::Login, None)),
        }
    }
}

impl ViewTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reason carried by the most recent redirect to the login view.
    #[must_use]
    pub fn last_reason(&self) -> Option<LogoutReason> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .1
            .clone()
    }
}

impl Navigator for ViewTracker {
    fn current(&self) -> View {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).0
    }

    fn navigate(&self, view: View, reason: Option<&LogoutReason>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(from = ?state.0, to = ?view, reason = reason.map(LogoutReason::code), "navigate");
        state.0 = view;
        if let Some(reason) = reason {
            state.1 = Some(reason.clone());
        }
    }
}
