//! Error taxonomy for console operations

/// Failure of a console operation
///
/// `Network` means the request never completed. `Server` means the server
/// answered with a non-success status. `Validation` failures never leave the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    #[error("{message}")]
    Validation { message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Message suitable for an alert or a feedback region
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } | ApiError::Validation { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// HTTP status, for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
