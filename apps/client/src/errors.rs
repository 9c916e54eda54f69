use thiserror::Error;

/// Normalized failure type for every backend call.
///
/// The HTTP client classifies each failure into exactly one variant so that
/// services and views never branch on transport-specific error types. The
/// `Display` output is the user-facing message; callers that need the HTTP
/// status use [`ApiError::status`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured timeout elapsed before the backend answered.
    #[error("Request timeout. Please try again.")]
    Timeout,

    /// HTTP 401. Outside the chatbot endpoints this also clears the stored
    /// token and triggers the login redirect.
    #[error("Please log in to continue")]
    Unauthorized,

    /// Any other non-2xx response, carrying the backend's own message where
    /// it supplied one.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The request went out but no response ever arrived.
    #[error("No response received from server")]
    Network,

    /// The request could not be constructed or dispatched.
    #[error("Request failed: {0}")]
    Setup(String),

    /// The backend answered 2xx with a body this client could not interpret.
    #[error("Malformed response from server: {0}")]
    Decode(String),

    /// Rejected locally before any network call was made.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status associated with this failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures that never left the client (no request was sent).
    pub fn is_local(&self) -> bool {
        matches!(self, ApiError::Validation(_) | ApiError::Setup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_displays_verbatim_message() {
        let err = ApiError::Backend {
            status: 400,
            message: "File too large".to_string(),
        };
        assert_eq!(err.to_string(), "File too large");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_timeout_message_matches_contract() {
        assert_eq!(
            ApiError::Timeout.to_string(),
            "Request timeout. Please try again."
        );
        assert_eq!(ApiError::Timeout.status(), None);
    }

    #[test]
    fn test_network_message_matches_contract() {
        assert_eq!(
            ApiError::Network.to_string(),
            "No response received from server"
        );
    }

    #[test]
    fn test_unauthorized_carries_401() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }

    #[test]
    fn test_validation_is_local() {
        assert!(ApiError::Validation("too short".to_string()).is_local());
        assert!(!ApiError::Network.is_local());
        assert!(!ApiError::Unauthorized.is_local());
    }
}
