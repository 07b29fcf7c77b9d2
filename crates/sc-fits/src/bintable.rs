//! Binary-table (BINTABLE) extension decoding: row geometry and column reads.

use crate::error::{FitsError, Result};
use crate::header::Header;

/// Element type of a binary-table field, from the TFORMn type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TFormKind {
    /// `L`: one-byte logical.
    Logical,
    /// `X`: bit array, packed eight per byte.
    BitArray,
    /// `B`: unsigned byte.
    Byte,
    /// `I`: big-endian i16.
    I16,
    /// `J`: big-endian i32.
    I32,
    /// `K`: big-endian i64.
    I64,
    /// `A`: ASCII character.
    Char,
    /// `E`: big-endian f32.
    F32,
    /// `D`: big-endian f64.
    F64,
    /// `C`: single-precision complex.
    Complex64,
    /// `M`: double-precision complex.
    Complex128,
    /// `P`: 32-bit variable-length array descriptor.
    Desc32,
    /// `Q`: 64-bit variable-length array descriptor.
    Desc64,
}

impl TFormKind {
    fn from_code(code: char) -> Option<TFormKind> {
        Some(match code {
            'L' => TFormKind::Logical,
            'X' => TFormKind::BitArray,
            'B' => TFormKind::Byte,
            'I' => TFormKind::I16,
            'J' => TFormKind::I32,
            'K' => TFormKind::I64,
            'A' => TFormKind::Char,
            'E' => TFormKind::F32,
            'D' => TFormKind::F64,
            'C' => TFormKind::Complex64,
            'M' => TFormKind::Complex128,
            'P' => TFormKind::Desc32,
            'Q' => TFormKind::Desc64,
            _ => return None,
        })
    }

    /// Bytes per element. Bit arrays are handled in [`TForm::byte_len`].
    fn elem_len(self) -> usize {
        match self {
            TFormKind::Logical | TFormKind::Byte | TFormKind::Char | TFormKind::BitArray => 1,
            TFormKind::I16 => 2,
            TFormKind::I32 | TFormKind::F32 => 4,
            TFormKind::I64 | TFormKind::F64 | TFormKind::Complex64 | TFormKind::Desc32 => 8,
            TFormKind::Complex128 | TFormKind::Desc64 => 16,
        }
    }
}

/// A parsed TFORMn value: repeat count plus element type.
#[derive(Debug, Clone, Copy)]
pub struct TForm {
    /// Elements per row in this field.
    pub repeat: usize,
    /// Element type.
    pub kind: TFormKind,
}

impl TForm {
    /// Parse a TFORMn value such as `1024E` or `D`. The repeat count
    /// defaults to 1. Trailing characters (the `P`/`Q` max-length suffix)
    /// are ignored.
    pub fn parse(raw: &str) -> Option<TForm> {
        let raw = raw.trim();
        let digits = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
        let repeat: usize = if digits == 0 { 1 } else { raw[..digits].parse().ok()? };
        let kind = TFormKind::from_code(raw[digits..].chars().next()?)?;
        // The field's byte length must be representable.
        repeat.checked_mul(kind.elem_len())?;
        Some(TForm { repeat, kind })
    }

    /// Bytes this field occupies in one row.
    pub fn byte_len(&self) -> usize {
        match self.kind {
            TFormKind::BitArray => self.repeat.div_ceil(8),
            kind => self.repeat * kind.elem_len(),
        }
    }
}

/// One table column: trimmed TTYPEn name, TFORMn, and row-relative offset.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name from TTYPEn, empty when absent.
    pub name: String,
    /// Field layout from TFORMn.
    pub form: TForm,
    /// Byte offset of the field within each row.
    pub offset: usize,
}

/// A binary table bound to its raw data unit.
#[derive(Debug)]
pub struct BinTable<'a> {
    row_len: usize,
    nrows: usize,
    columns: Vec<Column>,
    data: &'a [u8],
}

impl<'a> BinTable<'a> {
    /// Interpret `data` using the table geometry in `header`. Validates
    /// that the declared columns fit in a row and the declared rows fit
    /// in the data unit.
    pub fn from_hdu(header: &Header, data: &'a [u8]) -> Result<BinTable<'a>> {
        let row_len = req_dim(header, "NAXIS1")?;
        let nrows = req_dim(header, "NAXIS2")?;
        let tfields = req_dim(header, "TFIELDS")?;

        let mut columns = Vec::with_capacity(tfields);
        let mut offset = 0usize;
        for i in 1..=tfields {
            let key = format!("TFORM{i}");
            let raw = header.require_str(&key)?;
            let form = TForm::parse(raw).ok_or_else(|| FitsError::BadValue {
                key,
                value: raw.to_string(),
            })?;
            let name = header
                .str_value(&format!("TTYPE{i}"))
                .unwrap_or("")
                .trim()
                .to_string();
            columns.push(Column { name, form, offset });
            offset = offset
                .checked_add(form.byte_len())
                .ok_or_else(|| FitsError::Invalid("row layout overflows usize".to_string()))?;
        }
        if offset > row_len {
            return Err(FitsError::Invalid(format!(
                "columns span {offset} bytes but NAXIS1 is {row_len}"
            )));
        }
        let need = row_len
            .checked_mul(nrows)
            .ok_or_else(|| FitsError::Invalid("table size overflows usize".to_string()))?;
        if need > data.len() {
            return Err(FitsError::Truncated { need, have: data.len() });
        }
        Ok(BinTable { row_len, nrows, columns, data })
    }

    /// Number of rows (NAXIS2).
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Column metadata in field order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Index of the column named `name`, matched case-insensitively.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Read every element of column `idx` as f64, row-major. Supports
    /// float columns only; this is all a probability map needs.
    pub fn column_f64(&self, idx: usize) -> Result<Vec<f64>> {
        let col = self
            .columns
            .get(idx)
            .ok_or_else(|| FitsError::Invalid(format!("table has no column {idx}")))?;
        let elem = match col.form.kind {
            TFormKind::F32 => 4,
            TFormKind::F64 => 8,
            kind => {
                return Err(FitsError::Unsupported(format!(
                    "table column type {kind:?} as probability data"
                )))
            }
        };
        let mut out = Vec::with_capacity(self.nrows * col.form.repeat);
        for row in 0..self.nrows {
            let base = row * self.row_len + col.offset;
            for k in 0..col.form.repeat {
                let b = &self.data[base + k * elem..base + (k + 1) * elem];
                let v = match col.form.kind {
                    TFormKind::F32 => f32::from_be_bytes([b[0], b[1], b[2], b[3]]) as f64,
                    _ => f64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
                };
                out.push(v);
            }
        }
        Ok(out)
    }
}

fn req_dim(header: &Header, key: &str) -> Result<usize> {
    let v = header.require_int(key)?;
    usize::try_from(v).map_err(|_| FitsError::BadValue {
        key: key.to_string(),
        value: v.to_string(),
    })
}
