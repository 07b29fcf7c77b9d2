//! Core types, errors, and traits for skycut.
//!
//! This crate is the bottom of the workspace: it owns the shared [`SkyMap`]
//! data model, the error taxonomy, and the [`SkyMapSource`] trait that lets
//! the filtering orchestration run against the remote catalog, a local
//! directory, or an in-memory fake in tests.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result, SourceError};
pub use traits::SkyMapSource;
pub use types::{PixelOrdering, SkyMap};

/// Crate version (shared by the CLI's `version` subcommand).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
