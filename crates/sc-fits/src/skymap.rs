//! Locating and decoding the probability table inside a FITS file.

use sc_core::{PixelOrdering, SkyMap};
use sc_healpix::geom;

use crate::bintable::BinTable;
use crate::error::{FitsError, Result};
use crate::hdu;

/// Column holding per-pixel probability in LIGO/Virgo sky-map tables.
const PROB_COLUMN: &str = "PROB";

/// Decode a full-sky HEALPix probability map from uncompressed FITS bytes.
///
/// The map is taken from the first BINTABLE extension. The probability
/// column is located by name (`PROB`, case-insensitive) and falls back to
/// the first column, which matches how single-column bayestar maps are
/// laid out.
pub fn decode_sky_map(bytes: &[u8]) -> Result<SkyMap> {
    let hdus = hdu::parse_hdus(bytes)?;
    let table_hdu = hdus
        .iter()
        .skip(1)
        .find(|h| {
            h.header
                .str_value("XTENSION")
                .is_some_and(|x| x.eq_ignore_ascii_case("BINTABLE"))
        })
        .ok_or(FitsError::NoSkyMapTable)?;
    let header = &table_hdu.header;

    // Partial-sky maps list explicit pixel indices; those need the index
    // column applied and are out of scope here.
    if header
        .str_value("INDXSCHM")
        .is_some_and(|v| v.eq_ignore_ascii_case("EXPLICIT"))
    {
        return Err(FitsError::Unsupported(
            "partial-sky (EXPLICIT-indexed) maps".to_string(),
        ));
    }

    let ordering_raw = header.require_str("ORDERING")?;
    let ordering = match ordering_raw.to_ascii_uppercase().as_str() {
        "RING" => PixelOrdering::Ring,
        "NESTED" | "NEST" => PixelOrdering::Nested,
        "NUNIQ" => {
            return Err(FitsError::Unsupported(
                "multi-order (NUNIQ) sky maps".to_string(),
            ))
        }
        _ => {
            return Err(FitsError::BadValue {
                key: "ORDERING".to_string(),
                value: ordering_raw.to_string(),
            })
        }
    };

    let table = BinTable::from_hdu(header, table_hdu.data(bytes))?;
    if table.columns().is_empty() {
        return Err(FitsError::MissingColumn);
    }
    let col = table.find_column(PROB_COLUMN).unwrap_or(0);
    let prob = table.column_f64(col)?;

    // NSIDE from the header when present; otherwise derive it from the
    // pixel count the way healpy's get_nside does.
    let nside = match header.int_value("NSIDE") {
        Some(v) => u32::try_from(v)
            .ok()
            .filter(|n| geom::is_valid_nside(*n))
            .ok_or_else(|| FitsError::BadValue {
                key: "NSIDE".to_string(),
                value: v.to_string(),
            })?,
        None => geom::npix2nside(prob.len()).ok_or_else(|| {
            FitsError::Invalid(format!(
                "{} pixels is not a full-sky HEALPix map length",
                prob.len()
            ))
        })?,
    };
    let npix = geom::nside2npix(nside).map_err(|e| FitsError::Invalid(e.to_string()))?;
    if prob.len() != npix {
        return Err(FitsError::Invalid(format!(
            "NSIDE {nside} implies {npix} pixels but the table holds {}",
            prob.len()
        )));
    }

    SkyMap::new(nside, ordering, prob).map_err(|e| FitsError::Invalid(e.to_string()))
}
