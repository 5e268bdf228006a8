//! Error types for the memo notes service.

use thiserror::Error;

/// Result type alias using memo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the note-retrieval pipeline.
///
/// Every component raises through this taxonomy and nothing is
/// swallowed below the HTTP boundary, which classifies exactly once:
///
/// - [`Error::Validation`] — caller input malformed or inconsistent;
///   recoverable by resubmitting a corrected query.
/// - [`Error::UnsupportedQuery`] — a recognized but deliberately
///   disabled query feature; distinct from structural validation so
///   callers can tell "fix your request" from "not available yet".
/// - [`Error::Unauthorized`] — credential missing, invalid, or bound
///   to a different subject; recoverable by re-authenticating.
/// - [`Error::Storage`] — the backing document store failed; carries
///   the provider's error code, never retried here.
/// - [`Error::Internal`] — defensive catch-all, treated as a fault.
#[derive(Error, Debug)]
pub enum Error {
    /// Query parameters failed validation.
    #[error("Invalid query: {0}")]
    Validation(String),

    /// Query feature is recognized but not available.
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// Authentication or subject cross-check failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Document store operation failed with a provider error code.
    #[error("Storage error: {code}")]
    Storage { code: String },

    /// Internal error outside the taxonomy.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The provider error code for storage failures, if any.
    pub fn storage_code(&self) -> Option<&str> {
        match self {
            Error::Storage { code } => Some(code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("User is not specified".to_string());
        assert_eq!(err.to_string(), "Invalid query: User is not specified");
    }

    #[test]
    fn test_error_display_unsupported_query() {
        let err = Error::UnsupportedQuery("text query is not supported at this moment".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported query: text query is not supported at this moment"
        );
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: invalid token");
    }

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage {
            code: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Storage error: unavailable");
    }

    #[test]
    fn test_error_display_internal() {
        let err = Error::Internal("unexpected state".to_string());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }

    #[test]
    fn test_storage_code_accessor() {
        let err = Error::Storage {
            code: "permission-denied".to_string(),
        };
        assert_eq!(err.storage_code(), Some("permission-denied"));
        assert_eq!(Error::Internal("x".to_string()).storage_code(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Internal(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Internal error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
