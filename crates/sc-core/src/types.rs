//! Common data types for skycut

use crate::error::{Error, Result};

/// Pixel ordering scheme of a HEALPix map.
///
/// Recorded by the decoder for diagnostics. The credible-region computation
/// is ordering-independent: it only consumes the multiset of per-pixel
/// probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOrdering {
    /// Iso-latitude ring ordering.
    Ring,
    /// Hierarchical nested ordering.
    Nested,
}

impl PixelOrdering {
    /// Canonical header spelling ("RING" / "NESTED").
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelOrdering::Ring => "RING",
            PixelOrdering::Nested => "NESTED",
        }
    }
}

impl std::fmt::Display for PixelOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pixelized all-sky probability distribution for one event.
///
/// One probability per HEALPix pixel, non-negative, summing to ~1.0 over the
/// sphere (the decoder does not renormalize; the evaluator tolerates
/// floating-point shortfall). Decoded from a single downloaded file, checked
/// once, then dropped.
#[derive(Debug, Clone)]
pub struct SkyMap {
    /// HEALPix resolution parameter (positive power of two).
    pub nside: u32,
    /// Pixel ordering scheme as declared by the file.
    pub ordering: PixelOrdering,
    /// Per-pixel probability mass, length `12 * nside^2`.
    pub prob: Vec<f64>,
}

impl SkyMap {
    /// Build a map, enforcing the data-model invariants: `nside` must be a
    /// positive power of two and `prob` must cover every pixel.
    pub fn new(nside: u32, ordering: PixelOrdering, prob: Vec<f64>) -> Result<Self> {
        if !nside.is_power_of_two() {
            return Err(Error::InvalidArgument(format!(
                "nside must be a positive power of two, got {nside}"
            )));
        }
        let npix = (nside as usize)
            .checked_mul(nside as usize)
            .and_then(|n| n.checked_mul(12))
            .ok_or_else(|| {
                Error::InvalidArgument(format!("pixel count overflows for nside {nside}"))
            })?;
        if prob.len() != npix {
            return Err(Error::InvalidArgument(format!(
                "map has {} pixels but nside {} implies {}",
                prob.len(),
                nside,
                npix
            )));
        }
        Ok(Self { nside, ordering, prob })
    }

    /// Number of pixels (`12 * nside^2`).
    pub fn npix(&self) -> usize {
        self.prob.len()
    }
}
