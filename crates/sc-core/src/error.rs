//! Error types for skycut

use thiserror::Error;

/// skycut error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Contract violation on a caller-supplied argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Per-event failure while fetching or decoding a sky map.
///
/// A `SourceError` never aborts a batch run: the orchestration records the
/// reason, skips the event, and continues. The three variants mirror the
/// failure modes of a [`crate::SkyMapSource`]: the event (or its map file)
/// does not exist, the transport failed, or the bytes would not decode.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The catalog has no such event, or the event has no such file.
    #[error("not found: {event_id}")]
    NotFound {
        /// Event identifier as supplied by the caller.
        event_id: String,
    },

    /// Transport failure while reaching the backing store.
    #[error("network error: {0}")]
    Network(String),

    /// The fetched bytes are not a readable sky map.
    #[error("decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_display_names_the_event() {
        let e = SourceError::NotFound { event_id: "S190425z".into() };
        assert_eq!(e.to_string(), "not found: S190425z");
    }

    #[test]
    fn invalid_argument_display() {
        let e = Error::InvalidArgument("mass fraction must be in (0, 1]".into());
        assert!(e.to_string().starts_with("invalid argument:"));
    }
}
