//! The session manager: one per tab.
//!
//! The token lives in shared storage, which any tab (or a person with a text
//! editor) can change. This tab remembers the last token it wrote itself and
//! treats any other value as foreign.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use pc_api::{AuthApi, Credentials};
use pc_storage::{SharedStorage, StorageEvent, TOKEN_KEY};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::clock::Clock;
use crate::error::{AuthError, TokenError};
use crate::navigation::{LogoutReason, Navigator, View};
use crate::password::digest_password;
use crate::token::{self, TokenClaims};

/// Minimum username length, in characters.
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenClaims> for Session {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.subject,
            expires_at: claims.expires_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// `reason` is `None` when no session ever existed in this tab.
    LoggedOut { reason: Option<LogoutReason> },
    LoggedIn(Session),
}

impl SessionState {
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

/// Runs when a session ends, after the state has changed.
pub trait LogoutHook: Send + Sync {
    fn on_logout(&self, reason: &LogoutReason);
}

/// Supplies bearer tokens to request code and hears about backend rejections.
pub trait BearerSource: Send + Sync {
    /// A token that is safe to send right now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when there is no usable session.
    fn bearer(&self) -> Result<String, TokenError>;

    /// The backend answered 401 to a request made with our token.
    fn reject(&self);

    fn is_logged_in(&self) -> bool;
}

#[derive(Clone, Copy)]
enum Endpoint {
    Login,
    Register,
}

struct Inner {
    /// The last token this tab wrote; `None` while logged out.
    last_written: Option<String>,
}

/// Owns the token lifecycle for one tab.
pub struct SessionManager<A> {
    api: A,
    storage: Arc<dyn SharedStorage>,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<Inner>,
    state: watch::Sender<SessionState>,
    hooks: Mutex<Vec<Weak<dyn LogoutHook>>>,
    watchdog: Mutex<Option<AbortHandle>>,
}

impl<A: AuthApi> SessionManager<A> {
    #[must_use]
    pub fn new(
        api: A,
        storage: Arc<dyn SharedStorage>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut { reason: None });
        Self {
            api,
            storage,
            clock,
            navigator,
            inner: Mutex::new(Inner { last_written: None }),
            state,
            hooks: Mutex::new(Vec::new()),
            watchdog: Mutex::new(None),
        }
    }

    /// Adopt a valid token left in storage by an earlier run, or clear a
    /// stale one.
    pub fn init(&self) -> SessionState {
        let adopted = {
            let mut inner = self.lock_inner();
            let stored = self.read_token();
            match stored.as_deref().map(|raw| (raw, token::decode(raw))) {
                Some((raw, Ok(claims))) if !claims.is_expired(self.clock.now()) => {
                    inner.last_written = Some(raw.to_string());
                    Some(Session::from(claims))
                }
                Some((_, result)) => {
                    tracing::info!(valid = result.is_ok(), "removing stale token found at startup");
                    self.remove_token();
                    inner.last_written = None;
                    None
                }
                None => {
                    inner.last_written = None;
                    None
                }
            }
        };

        if let Some(session) = adopted {
            tracing::debug!(username = %session.username, "resumed stored session");
            self.state.send_replace(SessionState::LoggedIn(session));
            self.navigator.navigate(View::Main, None);
        } else {
            self.state.send_replace(SessionState::LoggedOut { reason: None });
            if self.navigator.current() != View::Login {
                self.navigator.navigate(View::Login, None);
            }
        }
        self.state()
    }

    /// Sign in with existing credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] for invalid input, a backend refusal, an
    /// unreachable backend, or an unusable token. State is untouched on error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.authenticate(Endpoint::Login, username, password).await
    }

    /// Create an account and sign in. Same contract as [`Self::login`].
    ///
    /// # Errors
    ///
    /// See [`Self::login`]; a taken username is [`AuthError::Conflict`].
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.authenticate(Endpoint::Register, username, password).await
    }

    async fn authenticate(
        &self,
        endpoint: Endpoint,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let credentials = validate_credentials(username, password)?;
        let response = match endpoint {
            Endpoint::Login => self.api.login(&credentials).await,
            Endpoint::Register => self.api.register(&credentials).await,
        }
        .inspect_err(|error| tracing::debug!(%error, username = %credentials.username, "authentication failed"))?;

        let claims = token::decode(&response.token)?;
        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired.into());
        }

        {
            let mut inner = self.lock_inner();
            self.storage.set(TOKEN_KEY, &response.token)?;
            inner.last_written = Some(response.token);
        }

        let session = Session::from(claims);
        tracing::info!(username = %session.username, expires_at = %session.expires_at, "signed in");
        self.state.send_replace(SessionState::LoggedIn(session.clone()));
        self.navigator.navigate(View::Main, None);
        Ok(session)
    }

    /// End the session at the user's request. Always shows the login view.
    pub fn logout(&self, message: Option<String>) {
        self.sign_out(LogoutReason::UserRequested(message), true);
    }

    /// End the session because an invariant broke. Redirects only when not
    /// already on the login view.
    pub fn force_logout(&self, reason: LogoutReason) {
        self.sign_out(reason, false);
    }

    fn sign_out(&self, reason: LogoutReason, always_redirect: bool) {
        {
            let mut inner = self.lock_inner();
            self.remove_token();
            inner.last_written = None;
        }

        if reason.is_forced() {
            tracing::warn!(reason = %reason, "session ended");
        } else {
            tracing::info!("signed out");
        }
        self.state.send_replace(SessionState::LoggedOut {
            reason: Some(reason.clone()),
        });

        for hook in self.live_hooks() {
            hook.on_logout(&reason);
        }

        if always_redirect || self.navigator.current() != View::Login {
            self.navigator.navigate(View::Login, Some(&reason));
        }
    }

    /// Token present in storage and not expired. Never fails.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_token()
            .and_then(|raw| token::decode(&raw).ok())
            .is_some_and(|claims| !claims.is_expired(self.clock.now()))
    }

    /// Re-read and re-validate the stored token for an outgoing request.
    ///
    /// A foreign or expired token ends the session before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// [`TokenError::Missing`] when logged out or the token is gone,
    /// [`TokenError::Tampered`], [`TokenError::Expired`] or
    /// [`TokenError::Malformed`] otherwise.
    pub fn bearer_token(&self) -> Result<String, TokenError> {
        let verdict = {
            let inner = self.lock_inner();
            let Some(last) = inner.last_written.as_deref() else {
                return Err(TokenError::Missing);
            };
            match self.read_token() {
                None => return Err(TokenError::Missing),
                Some(current) if current != last => Err((LogoutReason::Tampered, TokenError::Tampered)),
                Some(current) => match token::decode(&current) {
                    Ok(claims) if !claims.is_expired(self.clock.now()) => Ok(current),
                    Ok(_) => Err((LogoutReason::Expired, TokenError::Expired)),
                    Err(error) => Err((LogoutReason::Expired, error)),
                },
            }
        };

        verdict.map_err(|(reason, error)| {
            self.force_logout(reason);
            error
        })
    }

    /// One pass of the session invariant check. Returns the reason when the
    /// session was ended.
    pub fn enforce(&self) -> Option<LogoutReason> {
        let reason = {
            let inner = self.lock_inner();
            // A logged-out tab does not police tokens written by others.
            let last = inner.last_written.as_deref()?;
            match self.read_token() {
                None => LogoutReason::RemovedElsewhere,
                Some(current) if current != last => LogoutReason::Tampered,
                Some(current) => match token::decode(&current) {
                    Ok(claims) if !claims.is_expired(self.clock.now()) => return None,
                    _ => LogoutReason::Expired,
                },
            }
        };
        self.force_logout(reason.clone());
        Some(reason)
    }

    /// React to a change another tab made to shared storage.
    pub fn handle_storage_event(&self, event: &StorageEvent) -> Option<LogoutReason> {
        if event.key != TOKEN_KEY {
            return None;
        }
        let reason = {
            let inner = self.lock_inner();
            let last = inner.last_written.as_deref()?;
            let reason = match event.new_value.as_deref() {
                None => LogoutReason::RemovedElsewhere,
                Some(new) if new != last => LogoutReason::Tampered,
                Some(_) => return None,
            };
            // Events can arrive late; trust storage as it is now.
            if self.read_token().as_deref() == Some(last) {
                tracing::debug!(origin = %event.origin, "ignoring stale token event");
                return None;
            }
            reason
        };
        tracing::debug!(origin = %event.origin, reason = %reason, "token changed in another tab");
        self.force_logout(reason.clone());
        Some(reason)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Run `hook` on every future logout. The hook is held weakly.
    pub fn add_logout_hook<H: LogoutHook + 'static>(&self, hook: &Arc<H>) {
        let weak: Weak<dyn LogoutHook> = Arc::<H>::downgrade(hook);
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(weak);
    }

    /// Stop the watchdog, if one is running. The session itself is kept.
    pub fn teardown(&self) {
        if let Some(handle) = self
            .watchdog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
            tracing::debug!("session watchdog stopped");
        }
    }

    pub(crate) fn replace_watchdog(&self, handle: AbortHandle) {
        let previous = self
            .watchdog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn SharedStorage> {
        &self.storage
    }

    fn live_hooks(&self) -> Vec<Arc<dyn LogoutHook>> {
        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        hooks.retain(|hook| hook.strong_count() > 0);
        hooks.iter().filter_map(Weak::upgrade).collect()
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to read token from storage");
            None
        })
    }

    fn remove_token(&self) {
        if let Err(error) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(%error, "failed to remove token from storage");
        }
    }
}

impl<A: AuthApi> BearerSource for SessionManager<A> {
    fn bearer(&self) -> Result<String, TokenError> {
        self.bearer_token()
    }

    fn reject(&self) {
        self.force_logout(LogoutReason::Rejected);
    }

    fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in()
    }
}

/// Check credentials locally and digest the password for the wire.
///
/// # Errors
///
/// Returns [`AuthError::Invalid`] naming the field that is too short.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, AuthError> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AuthError::Invalid {
            field: "username",
            reason: format!("must be at least {MIN_USERNAME_LEN} characters"),
        });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Invalid {
            field: "password",
            reason: format!("must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }
    Ok(Credentials {
        username: username.to_string(),
        password: digest_password(password),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("al", "secret1", "username")]
    #[case("  al  ", "secret1", "username")]
    #[case("alice", "short", "password")]
    fn short_credentials_are_rejected(#[case] username: &str, #[case] password: &str, #[case] field: &str) {
        match validate_credentials(username, password) {
            Err(AuthError::Invalid { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn password_is_digested_and_username_trimmed() {
        let credentials = validate_credentials(" alice ", "password").expect("valid");
        assert_eq!(credentials.username, "alice");
        assert_eq!(
            credentials.password,
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }
}
