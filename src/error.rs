#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The stored credential has passed its expiry. The session has already
    /// been cleared; the caller must route the user back to authentication.
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// The backend rejected an update against a stale version number.
    /// Reload the record and retry explicitly.
    #[error("Version conflict: {0}")]
    VersionConflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid credential: {0}")]
    Credential(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Map a non-success HTTP status and its error body to the matching
    /// variant. Statuses without a dedicated variant fall through to `Api`.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound(message),
            400 => ClientError::BadRequest(message),
            409 => ClientError::VersionConflict(message),
            _ => ClientError::Api { status, message },
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
