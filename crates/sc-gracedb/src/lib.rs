//! # sc-gracedb
//!
//! Client for the GraceDB gravitational-wave event catalog.
//!
//! Fetches superevent records and their attached sky-map files over the
//! public REST API, and exposes the combination as a `SkyMapSource` for
//! the credible-area filter. Synchronous, one request at a time; no
//! retries.
//!
//! ## Example
//!
//! ```no_run
//! use sc_core::SkyMapSource;
//! use sc_gracedb::{GraceDbClient, GraceDbSkyMapSource};
//!
//! let client = GraceDbClient::public().unwrap();
//! let source = GraceDbSkyMapSource::new(client);
//! let map = source.fetch_map("S190425z").unwrap();
//! println!("nside: {}", map.nside);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use client::{DEFAULT_BASE_URL, GraceDbClient};
pub use error::{GraceDbError, Result};
pub use source::{DEFAULT_SKYMAP_FILENAME, GraceDbSkyMapSource};
pub use types::{Superevent, is_mock_id};
