//! Error type for FITS sky-map decoding.

use thiserror::Error;

/// Errors from parsing a FITS file into a sky map.
#[derive(Error, Debug)]
pub enum FitsError {
    /// The bytes do not start with a FITS primary header.
    #[error("not a FITS file (missing SIMPLE header)")]
    BadMagic,

    /// The file ends before a complete structure could be read.
    #[error("truncated file: need {need} bytes, have {have}")]
    Truncated {
        /// Bytes the current structure requires.
        need: usize,
        /// Bytes actually available.
        have: usize,
    },

    /// An 80-byte header card could not be parsed.
    #[error("malformed header card at byte {offset}: {reason}")]
    BadCard {
        /// Absolute offset of the card in the (decompressed) file.
        offset: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A required header card is absent.
    #[error("missing required header card {0}")]
    MissingCard(String),

    /// A header card is present but its value is unusable.
    #[error("bad value for header card {key}: {value:?}")]
    BadValue {
        /// Card keyword.
        key: String,
        /// Raw value text.
        value: String,
    },

    /// No binary-table extension to read a sky map from.
    #[error("no sky-map binary table extension found")]
    NoSkyMapTable,

    /// The table has no columns at all.
    #[error("binary table has no columns")]
    MissingColumn,

    /// The file is valid FITS but uses a sky-map flavor this reader does not
    /// handle (multi-order NUNIQ maps, partial-sky EXPLICIT indexing, ...).
    #[error("unsupported sky map: {0}")]
    Unsupported(String),

    /// Structurally parsed but internally inconsistent.
    #[error("invalid sky map: {0}")]
    Invalid(String),

    /// Gzip stream failed to inflate.
    #[error("gzip error: {0}")]
    Gzip(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, FitsError>;
