//! Splitting a file into HDUs: header units plus their padded data units.

use crate::error::{FitsError, Result};
use crate::header::{BLOCK_LEN, Header};

const MAGIC: &[u8] = b"SIMPLE";

/// One header-data unit.
#[derive(Debug, Clone)]
pub struct Hdu {
    /// The parsed header cards.
    pub header: Header,
    /// Byte offset of the data unit within the file.
    pub data_start: usize,
    /// Unpadded data length in bytes.
    pub data_len: usize,
}

impl Hdu {
    /// The data unit, without block padding.
    pub fn data<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.data_start..self.data_start + self.data_len]
    }
}

/// Parse every HDU in `bytes`. The primary HDU must open with the
/// `SIMPLE` keyword.
pub fn parse_hdus(bytes: &[u8]) -> Result<Vec<Hdu>> {
    if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
        return Err(FitsError::BadMagic);
    }
    let mut hdus = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (header, data_start) = Header::parse(bytes, offset)?;
        let data_len = data_size(&header)?;
        if data_len > bytes.len() - data_start {
            return Err(FitsError::Truncated {
                need: data_len,
                have: bytes.len() - data_start,
            });
        }
        hdus.push(Hdu { header, data_start, data_len });
        // Advance past the padded data unit. Writers sometimes omit the
        // final block's padding, which just ends the loop.
        offset = data_start + data_len.div_ceil(BLOCK_LEN) * BLOCK_LEN;
    }
    Ok(hdus)
}

/// Unpadded data-unit size: |BITPIX|/8 * GCOUNT * (PCOUNT + NAXIS1*...*NAXISn).
fn data_size(header: &Header) -> Result<usize> {
    let bitpix = header.require_int("BITPIX")?;
    if !matches!(bitpix, 8 | 16 | 32 | 64 | -32 | -64) {
        return Err(FitsError::BadValue {
            key: "BITPIX".to_string(),
            value: bitpix.to_string(),
        });
    }
    let naxis = header.require_int("NAXIS")?;
    if !(0..=999).contains(&naxis) {
        return Err(FitsError::BadValue {
            key: "NAXIS".to_string(),
            value: naxis.to_string(),
        });
    }
    if naxis == 0 {
        return Ok(0);
    }
    let mut pixels = 1usize;
    for n in 1..=naxis {
        let key = format!("NAXIS{n}");
        let len = header.require_int(&key)?;
        let len = usize::try_from(len).map_err(|_| FitsError::BadValue {
            key,
            value: len.to_string(),
        })?;
        pixels = pixels
            .checked_mul(len)
            .ok_or_else(|| FitsError::Invalid("data size overflows usize".to_string()))?;
    }
    let gcount = nonneg(header, "GCOUNT", 1)?;
    let pcount = nonneg(header, "PCOUNT", 0)?;
    let elem = bitpix.unsigned_abs() as usize / 8;
    pixels
        .checked_add(pcount)
        .and_then(|n| n.checked_mul(gcount))
        .and_then(|n| n.checked_mul(elem))
        .ok_or_else(|| FitsError::Invalid("data size overflows usize".to_string()))
}

fn nonneg(header: &Header, key: &str, default: usize) -> Result<usize> {
    match header.int_value(key) {
        None => Ok(default),
        Some(v) => usize::try_from(v).map_err(|_| FitsError::BadValue {
            key: key.to_string(),
            value: v.to_string(),
        }),
    }
}
