//! Credible-region area over a probability sky map.
//!
//! The credible region for mass fraction `f` is the smallest set of
//! highest-probability pixels whose probabilities sum to at least `f`. Only
//! its area is ever needed, so the computation reduces to counting pixels:
//! sort descending, accumulate, stop at the first index reaching `f`.

use sc_core::{Error, Result};

use crate::geom;

/// Area in square degrees of the smallest pixel set holding at least
/// `mass_fraction` of the probability.
///
/// `prob` is one non-negative value per pixel (any order; ties among equal
/// probabilities cannot change the count). `nside` fixes the per-pixel solid
/// angle. A map whose cumulative sum never reaches the fraction (empty,
/// all-zero, or short of 1.0 by rounding) resolves to the full-sphere pixel
/// count rather than an error.
///
/// Fails with [`Error::InvalidArgument`] when `mass_fraction` is outside
/// `(0, 1]` or `nside` is zero; neither is ever clamped.
pub fn credible_area_deg2(prob: &[f64], nside: u32, mass_fraction: f64) -> Result<f64> {
    // `!(x > 0.0 && x <= 1.0)` also rejects NaN.
    if !(mass_fraction > 0.0 && mass_fraction <= 1.0) {
        return Err(Error::InvalidArgument(format!(
            "mass fraction must be in (0, 1], got {mass_fraction}"
        )));
    }
    let npix = geom::nside2npix(nside)?;
    let pixarea = geom::nside2pixarea_deg2(nside)?;

    let mut sorted = prob.to_vec();
    sorted.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut cum = 0.0;
    let mut n_pixels = None;
    for (i, p) in sorted.iter().enumerate() {
        cum += p;
        if cum >= mass_fraction {
            n_pixels = Some(i + 1);
            break;
        }
    }
    // Unreached fraction means a degenerate map: charge the whole sphere.
    let n_pixels = n_pixels.unwrap_or(npix);

    Ok(n_pixels as f64 * pixarea)
}
