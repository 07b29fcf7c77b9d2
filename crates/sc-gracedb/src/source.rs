//! The remote [`SkyMapSource`]: catalog lookup, file download, FITS decode.

use sc_core::{SkyMap, SkyMapSource, SourceError};

use crate::client::GraceDbClient;
use crate::error::GraceDbError;

/// Sky-map file the low-latency pipeline attaches to each superevent.
pub const DEFAULT_SKYMAP_FILENAME: &str = "bayestar.fits.gz";

/// Fetches sky maps from a GraceDB service.
pub struct GraceDbSkyMapSource {
    client: GraceDbClient,
    filename: String,
}

impl GraceDbSkyMapSource {
    /// Source downloading [`DEFAULT_SKYMAP_FILENAME`] for each event.
    pub fn new(client: GraceDbClient) -> Self {
        Self::with_filename(client, DEFAULT_SKYMAP_FILENAME)
    }

    /// Source downloading a specific attached file, e.g. `LALInference.fits.gz`.
    pub fn with_filename(client: GraceDbClient, filename: impl Into<String>) -> Self {
        Self { client, filename: filename.into() }
    }
}

impl SkyMapSource for GraceDbSkyMapSource {
    fn fetch_map(&self, event_id: &str) -> std::result::Result<SkyMap, SourceError> {
        // Resolve the record first; it both validates the ID and yields the
        // canonical superevent_id for the file URL.
        let record = self.client.superevent(event_id).map_err(source_error)?;
        let bytes = self
            .client
            .download(&record.superevent_id, &self.filename)
            .map_err(source_error)?;
        sc_fits::read_sky_map_bytes(&bytes).map_err(|e| SourceError::Decode(e.to_string()))
    }

    fn name(&self) -> &str {
        "gracedb"
    }
}

fn source_error(err: GraceDbError) -> SourceError {
    match err {
        GraceDbError::NotFound { event_id, .. } => SourceError::NotFound { event_id },
        GraceDbError::Json(e) => SourceError::Decode(format!("catalog record: {e}")),
        other => SourceError::Network(other.to_string()),
    }
}
