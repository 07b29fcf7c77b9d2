//! HEALPix building blocks for skycut.
//!
//! This crate hosts the numeric core of the filter:
//! - equal-area pixelization geometry (pixel counts, pixel solid angles)
//! - the credible-region area evaluator over a probability map
//!
//! ## Example
//!
//! ```
//! use sc_healpix::credible::credible_area_deg2;
//! use sc_healpix::geom::nside2pixarea_deg2;
//!
//! // All probability in one pixel: the 90% region is exactly that pixel.
//! let mut prob = vec![0.0; 12];
//! prob[7] = 1.0;
//! let area = credible_area_deg2(&prob, 1, 0.9).unwrap();
//! assert_eq!(area, nside2pixarea_deg2(1).unwrap());
//! ```

pub mod credible;
pub mod geom;

pub use credible::credible_area_deg2;
pub use geom::{FULL_SKY_DEG2, npix2nside, nside2npix, nside2pixarea_deg2};
