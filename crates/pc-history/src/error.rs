use pc_api::ApiError;
use pc_auth::TokenError;
use pc_core::InputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("request failed: {0}")]
    Network(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] TokenError),
}

impl HistoryError {
    /// A message fit for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(error) => format!("Invalid input: {error}"),
            Self::Network(error) if error.is_unauthorized() => {
                "The server rejected your session. Please log in again.".into()
            }
            Self::Network(ApiError::Status { status, message }) if message.is_empty() => {
                format!("The server could not process the request (status {status}).")
            }
            Self::Network(ApiError::Status { message, .. }) => {
                format!("The server could not process the request: {message}")
            }
            Self::Network(ApiError::Transport(_)) => {
                "The server is unreachable. Check your connection and try again.".into()
            }
            Self::Network(ApiError::Decode(_)) => "The server sent an unexpected response.".into(),
            Self::Network(ApiError::Client(message)) => message.clone(),
            Self::Session(TokenError::Missing) => "You are not logged in.".into(),
            Self::Session(TokenError::Expired) => {
                "Your session has expired. Please log in again.".into()
            }
            Self::Session(TokenError::Tampered) => {
                "Your session was changed. Please log in again.".into()
            }
            Self::Session(TokenError::Malformed(_)) => {
                "Your session token is invalid. Please log in again.".into()
            }
        }
    }
}
