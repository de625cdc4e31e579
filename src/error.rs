use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure reported by the HTTP transport when no response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport failure: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Token acquisition failure.
///
/// `Clone` because one failed fetch is observed by every caller waiting on the
/// same token generation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("token endpoint returned {status}: {body}")]
    Rejected { status: StatusCode, body: Value },

    #[error("token endpoint returned an unusable body: {0}")]
    MalformedResponse(String),

    #[error("token request failed: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, Error)]
pub enum ZoomError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The API answered 401 again after the token was refreshed.
    #[error("authorization rejected after token refresh: {body}")]
    AuthorizationRejected { body: Value },

    #[error("api request failed with {status}: {body}")]
    Api { status: StatusCode, body: Value },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("unexpected payload in field '{field}': {reason}")]
    UnexpectedPayload { field: String, reason: String },
}

impl ZoomError {
    /// HTTP status behind the error, when the failure came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ZoomError::Api { status, .. } => Some(*status),
            ZoomError::AuthorizationRejected { .. } => Some(StatusCode::UNAUTHORIZED),
            ZoomError::Auth(AuthError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ZoomError::Auth(_) | ZoomError::AuthorizationRejected { .. })
    }
}
