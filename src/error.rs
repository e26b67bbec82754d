//! Error taxonomy for a harvest.
//!
//! Every failure aborts the whole harvest: records accumulated from earlier
//! pages are discarded and nothing is retried.

use thiserror::Error;

/// Errors that can occur while harvesting search results.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The query was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The search API answered with a non-success status.
    #[error("Search API error: {status} - {body}")]
    Remote { status: u16, body: String },

    /// The response body (or one of its items) did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl HarvestError {
    /// HTTP status of a [`HarvestError::Remote`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            HarvestError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller, not the remote, is at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, HarvestError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = HarvestError::Remote {
            status: 401,
            body: "Authentication failed".to_string(),
        };
        assert_eq!(err.to_string(), "Search API error: 401 - Authentication failed");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_invalid_argument_is_caller_error() {
        let err = HarvestError::InvalidArgument("page_size must be in 1..=100".to_string());
        assert!(err.is_caller_error());
        assert_eq!(err.status(), None);
    }
}
