//! Core traits for skycut
//!
//! Dependency inversion for the filtering loop: the orchestration asks a
//! [`SkyMapSource`] for one decoded map per event and never learns whether it
//! came over HTTP, off the filesystem, or out of a test fixture.

use crate::error::SourceError;
use crate::types::SkyMap;

/// Provider of decoded probability sky maps, one per event.
///
/// Implementations do whatever fetching and decoding they need internally;
/// every failure is reported as a [`SourceError`] so the caller can skip the
/// event and keep the batch going.
pub trait SkyMapSource {
    /// Fetch and decode the localization map for `event_id`.
    fn fetch_map(&self, event_id: &str) -> std::result::Result<SkyMap, SourceError>;

    /// Source name for diagnostics (e.g. "gracedb", "local directory").
    fn name(&self) -> &str;
}
