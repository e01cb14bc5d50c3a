use pc_api::ApiError;
use pc_storage::StorageError;
use thiserror::Error;

/// Why a stored token cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("not authenticated, run `pcheck auth login`")]
    Missing,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token expired, run `pcheck auth login` again")]
    Expired,

    #[error("token was changed outside this session")]
    Tampered,
}

/// Failure of an explicit authentication action.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    Unauthorized,

    #[error("a user with this name already exists")]
    Conflict,

    #[error("the server rejected the request: {0}")]
    BadRequest(String),

    #[error("access denied")]
    Forbidden,

    #[error("server is unreachable: {0}")]
    Unreachable(String),

    #[error("server error ({0})")]
    Server(u16),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status: 401, .. } => Self::Unauthorized,
            ApiError::Status { status: 409, .. } => Self::Conflict,
            ApiError::Status { status: 400, message } => Self::BadRequest(message),
            ApiError::Status { status: 403, .. } => Self::Forbidden,
            ApiError::Status { status, .. } => Self::Server(status),
            ApiError::Transport(error) => Self::Unreachable(error.to_string()),
            ApiError::Client(message) => Self::Unreachable(message),
            ApiError::Decode(message) => Self::Token(TokenError::Malformed(message)),
        }
    }
}
