//! Header card parsing: the 80-byte ASCII records FITS headers are made of.

use crate::error::{FitsError, Result};

/// Length of one header card in bytes.
pub const CARD_LEN: usize = 80;

/// A parsed header card.
///
/// `value` is `None` for commentary cards (COMMENT, HISTORY, END, ...);
/// for value cards it holds the value text with quoting and the inline
/// comment stripped.
#[derive(Debug, Clone)]
pub struct Card {
    /// Keyword, right-trimmed (e.g. "NSIDE", "TFORM1", "END").
    pub keyword: String,
    /// Value text, unquoted and trimmed. `None` when the card carries no
    /// value indicator.
    pub value: Option<String>,
}

impl Card {
    /// Parse one 80-byte card at absolute file offset `offset` (for
    /// diagnostics). Returns `None` for fully blank cards.
    pub fn parse(raw: &[u8], offset: usize) -> Result<Option<Card>> {
        debug_assert_eq!(raw.len(), CARD_LEN);
        // Multibyte text would break the fixed byte-offset slicing below.
        let text = std::str::from_utf8(raw)
            .ok()
            .filter(|t| t.is_ascii())
            .ok_or_else(|| FitsError::BadCard {
                offset,
                reason: "non-ASCII bytes".into(),
            })?;

        let keyword = text[..8].trim_end().to_string();
        if keyword.is_empty() {
            return Ok(None);
        }

        // "= " in columns 9-10 is the value indicator; anything else is
        // commentary and the rest of the card is free text.
        if &raw[8..10] != b"= " {
            return Ok(Some(Card { keyword, value: None }));
        }

        let value = parse_value(&text[10..], &keyword, offset)?;
        Ok(Some(Card { keyword, value: Some(value) }))
    }
}

/// Extract the value text from the part of a value card after "= ".
///
/// Quoted strings use `''` to escape a literal quote; trailing blanks inside
/// the quotes are not significant. Unquoted values run to the first `/`
/// (inline comment) and are trimmed.
fn parse_value(field: &str, keyword: &str, offset: usize) -> Result<String> {
    let trimmed = field.trim_start();
    let Some(rest) = trimmed.strip_prefix('\'') else {
        let before_comment = trimmed.split('/').next().unwrap_or("");
        return Ok(before_comment.trim().to_string());
    };

    let bytes = rest.as_bytes();
    let mut out = String::new();
    let mut i = 0;
    loop {
        match bytes.get(i) {
            None => {
                return Err(FitsError::BadCard {
                    offset,
                    reason: format!("unterminated string value for {keyword}"),
                });
            }
            Some(b'\'') if bytes.get(i + 1) == Some(&b'\'') => {
                out.push('\'');
                i += 2;
            }
            Some(b'\'') => break,
            Some(&b) => {
                out.push(b as char);
                i += 1;
            }
        }
    }
    Ok(out.trim_end().to_string())
}
