//! # sc-fits
//!
//! Native FITS reader for HEALPix probability sky maps.
//!
//! Reads the BINTABLE extension of LIGO/Virgo `bayestar.fits.gz` files
//! without cfitsio. Supports gzip-compressed input and both RING and
//! NESTED pixel orderings; partial-sky and multi-order maps are rejected.
//!
//! ## Example
//!
//! ```no_run
//! let map = sc_fits::read_sky_map("bayestar.fits.gz").unwrap();
//! println!("nside: {}, pixels: {}", map.nside, map.npix());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bintable;
pub mod card;
pub mod error;
pub mod hdu;
pub mod header;
pub mod skymap;

use std::path::Path;

use sc_core::SkyMap;

pub use bintable::{BinTable, Column, TForm, TFormKind};
pub use card::Card;
pub use error::{FitsError, Result};
pub use hdu::{Hdu, parse_hdus};
pub use header::{BLOCK_LEN, Header};
pub use skymap::decode_sky_map;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read a sky map from a `.fits` or `.fits.gz` file on disk.
pub fn read_sky_map(path: impl AsRef<Path>) -> Result<SkyMap> {
    let bytes = std::fs::read(path)?;
    read_sky_map_bytes(&bytes)
}

/// Read a sky map from in-memory bytes, inflating first when the gzip
/// magic is present.
pub fn read_sky_map_bytes(bytes: &[u8]) -> Result<SkyMap> {
    if bytes.starts_with(&GZIP_MAGIC) {
        decode_sky_map(&gunzip(bytes)?)
    } else {
        decode_sky_map(bytes)
    }
}

fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(|e| FitsError::Gzip(e.to_string()))?;
    Ok(out)
}
