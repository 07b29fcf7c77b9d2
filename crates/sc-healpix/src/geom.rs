//! HEALPix pixelization geometry.
//!
//! The pixelization splits the sphere into `12 * nside^2` equal-area pixels.
//! Only the counting side of the scheme matters here: the area filter never
//! needs pixel coordinates, just how many pixels there are and how much solid
//! angle each one covers.

use sc_core::{Error, Result};

/// Solid angle of the full sphere in square degrees: `4π * (180/π)^2`.
pub const FULL_SKY_DEG2: f64 = 129_600.0 / std::f64::consts::PI;

/// Whether `nside` is a legal HEALPix resolution (positive power of two).
pub fn is_valid_nside(nside: u32) -> bool {
    nside.is_power_of_two()
}

/// Number of pixels at resolution `nside` (`12 * nside^2`).
///
/// Rejects `nside == 0` and resolutions whose pixel count overflows `usize`;
/// power-of-two enforcement happens where maps enter the system.
pub fn nside2npix(nside: u32) -> Result<usize> {
    if nside == 0 {
        return Err(Error::InvalidArgument("nside must be a positive integer".into()));
    }
    (nside as usize)
        .checked_mul(nside as usize)
        .and_then(|n| n.checked_mul(12))
        .ok_or_else(|| Error::InvalidArgument(format!("pixel count overflows for nside {nside}")))
}

/// Resolution parameter for a full-sphere pixel count, or `None` when `npix`
/// is not `12 * k^2` for a power-of-two `k`.
pub fn npix2nside(npix: usize) -> Option<u32> {
    if npix == 0 || npix % 12 != 0 {
        return None;
    }
    let k2 = npix / 12;
    let k = (k2 as f64).sqrt().round() as usize;
    if k * k != k2 || k > u32::MAX as usize {
        return None;
    }
    let nside = k as u32;
    is_valid_nside(nside).then_some(nside)
}

/// Solid angle of one pixel at resolution `nside`, in square degrees.
pub fn nside2pixarea_deg2(nside: u32) -> Result<f64> {
    Ok(FULL_SKY_DEG2 / nside2npix(nside)? as f64)
}
