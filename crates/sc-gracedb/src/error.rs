//! Error types for catalog access.

use thiserror::Error;

/// Errors from talking to a GraceDB service.
#[derive(Error, Debug)]
pub enum GraceDbError {
    /// The service answered 404 for a superevent or one of its files.
    #[error("superevent {event_id}: {what} not found")]
    NotFound {
        /// The superevent ID that was queried.
        event_id: String,
        /// What was missing: the record itself or a file name.
        what: String,
    },

    /// Any non-404 error status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// The URL that produced it.
        url: String,
    },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured service URL does not parse.
    #[error("invalid service URL {url}: {reason}")]
    Url {
        /// The offending URL.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The service answered with a body that is not the expected JSON.
    #[error("bad catalog response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for catalog results.
pub type Result<T> = std::result::Result<T, GraceDbError>;
