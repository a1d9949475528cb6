use std::error::Error;
use std::fmt;

/// Failure taxonomy for backend calls and client-side validation.
#[derive(Debug)]
pub enum ApiError {
    /// Network or protocol failure before a response was obtained.
    Transport(String),
    /// 401-class response; the session has already been torn down.
    Unauthorized { message: String },
    /// Any other non-2xx response, carrying the backend's message when present.
    Backend { status: u16, message: String },
    /// The response body did not match the expected shape.
    Decode(serde_json::Error),
    /// Rejected client-side before any request was issued.
    Validation(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(message) => write!(f, "transport error: {}", message),
            ApiError::Unauthorized { message } => write!(f, "unauthorized: {}", message),
            ApiError::Backend { status, message } => {
                write!(f, "backend error ({}): {}", status, message)
            }
            ApiError::Decode(err) => write!(f, "failed to decode response: {}", err),
            ApiError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err)
    }
}
