//! Header-unit parsing: 2880-byte blocks of cards, terminated by END.

use crate::card::{CARD_LEN, Card};
use crate::error::{FitsError, Result};

/// Length of one FITS block in bytes. Headers and data are both padded to
/// whole blocks.
pub const BLOCK_LEN: usize = 2880;

/// One HDU's header: the cards up to (excluding) END.
#[derive(Debug, Clone)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    /// Parse header blocks starting at `start`. Returns the header and the
    /// offset just past its final block (where the data unit begins).
    pub fn parse(bytes: &[u8], start: usize) -> Result<(Header, usize)> {
        let mut cards = Vec::new();
        let mut offset = start;
        loop {
            if offset + BLOCK_LEN > bytes.len() {
                return Err(FitsError::Truncated {
                    need: BLOCK_LEN,
                    have: bytes.len().saturating_sub(offset),
                });
            }
            let mut saw_end = false;
            for i in 0..BLOCK_LEN / CARD_LEN {
                let at = offset + i * CARD_LEN;
                let Some(card) = Card::parse(&bytes[at..at + CARD_LEN], at)? else {
                    continue;
                };
                if card.keyword == "END" {
                    saw_end = true;
                    break;
                }
                cards.push(card);
            }
            offset += BLOCK_LEN;
            if saw_end {
                return Ok((Header { cards }, offset));
            }
        }
    }

    /// All cards in file order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn find(&self, key: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.keyword == key)
    }

    /// String value of `key`, if the card exists and carries a value.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(|c| c.value.as_deref())
    }

    /// Integer value of `key`; `None` when absent or unparsable.
    pub fn int_value(&self, key: &str) -> Option<i64> {
        self.str_value(key)?.parse().ok()
    }

    /// String value of `key`, or [`FitsError::MissingCard`].
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.str_value(key).ok_or_else(|| FitsError::MissingCard(key.to_string()))
    }

    /// Integer value of `key`, or [`FitsError::MissingCard`] /
    /// [`FitsError::BadValue`].
    pub fn require_int(&self, key: &str) -> Result<i64> {
        let raw = self.require_str(key)?;
        raw.parse().map_err(|_| FitsError::BadValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }
}
