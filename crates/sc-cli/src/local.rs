//! Local-directory sky-map source, for offline runs and tests.

use std::path::PathBuf;

use sc_core::{SkyMap, SkyMapSource, SourceError};
use sc_fits::FitsError;

/// Reads `<dir>/<event_id>.fits.gz` (or `.fits`) instead of a catalog
/// service. Pre-downloaded maps and CLI tests go through this.
pub struct DirSkyMapSource {
    dir: PathBuf,
}

impl DirSkyMapSource {
    /// Source over one flat directory of map files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidate(&self, event_id: &str) -> Option<PathBuf> {
        ["fits.gz", "fits"]
            .iter()
            .map(|ext| self.dir.join(format!("{event_id}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl SkyMapSource for DirSkyMapSource {
    fn fetch_map(&self, event_id: &str) -> Result<SkyMap, SourceError> {
        let Some(path) = self.candidate(event_id) else {
            return Err(SourceError::NotFound { event_id: event_id.to_string() });
        };
        sc_fits::read_sky_map(&path).map_err(|e| match e {
            FitsError::Io(io) => SourceError::Network(io.to_string()),
            other => SourceError::Decode(other.to_string()),
        })
    }

    fn name(&self) -> &str {
        "local directory"
    }
}
