//! Legal-description parsing.
//!
//! A legal description identifies a parcel by lot and/or block number
//! within a named subdivision, e.g. "Lot 12 Block 3 Shadylane". The
//! parcel service is queried by these attributes rather than by a
//! free-text address.

use regex::Regex;
use thiserror::Error;

use crate::classify::LEGAL_PATTERN;

#[derive(Debug, Error)]
pub enum LegalParseError {
    /// The string does not match the legal-description grammar. The
    /// caller should have classified it first; hitting this means a
    /// row was dispatched down the wrong path.
    #[error("not a legal description: {0:?}")]
    PatternMismatch(String),
    /// A lot/block capture that failed integer conversion (the grammar
    /// only admits digit runs, so in practice this means overflow).
    #[error("lot/block number {0:?} is out of range")]
    BadNumber(String),
}

/// A parsed cadastral reference. At least one of `lot`/`block` is
/// always present; `subdivision` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalDescription {
    pub lot: Option<i64>,
    pub block: Option<i64>,
    pub subdivision: String,
}

pub struct LegalParser {
    pattern: Regex,
}

impl LegalParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(LEGAL_PATTERN).expect("legal pattern is valid"),
        }
    }

    /// Extract lot/block numbers and the subdivision name.
    ///
    /// Each captured number lands in the field named by its keyword,
    /// so when both groups carry the same keyword the second one
    /// overwrites the first. That is the defined behavior for such
    /// strings, not an accident to paper over.
    ///
    /// The subdivision is taken verbatim; uppercasing for the parcel
    /// query happens when the where clause is built, not here.
    pub fn parse(&self, text: &str) -> Result<LegalDescription, LegalParseError> {
        let caps = self
            .pattern
            .captures(text)
            .ok_or_else(|| LegalParseError::PatternMismatch(text.to_string()))?;

        let mut lot = None;
        let mut block = None;

        let mut assign = |keyword: &str, number: &str| -> Result<(), LegalParseError> {
            let value: i64 = number
                .parse()
                .map_err(|_| LegalParseError::BadNumber(number.to_string()))?;
            match keyword {
                "Lot" => lot = Some(value),
                _ => block = Some(value),
            }
            Ok(())
        };

        assign(&caps[2], &caps[3])?;
        if caps.get(4).is_some() {
            assign(&caps[5], &caps[6])?;
        }

        Ok(LegalDescription {
            lot,
            block,
            subdivision: caps[7].to_string(),
        })
    }
}

impl Default for LegalParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_only() {
        let p = LegalParser::new();
        let legal = p.parse("Lot 12 Shadylane").unwrap();
        assert_eq!(legal.lot, Some(12));
        assert_eq!(legal.block, None);
        assert_eq!(legal.subdivision, "Shadylane");
    }

    #[test]
    fn test_block_only() {
        let p = LegalParser::new();
        let legal = p.parse("Block 3 Shadylane").unwrap();
        assert_eq!(legal.lot, None);
        assert_eq!(legal.block, Some(3));
        assert_eq!(legal.subdivision, "Shadylane");
    }

    #[test]
    fn test_lot_and_block() {
        let p = LegalParser::new();
        let legal = p.parse("Lot 12 Block 3 Shadylane").unwrap();
        assert_eq!(legal.lot, Some(12));
        assert_eq!(legal.block, Some(3));
        assert_eq!(legal.subdivision, "Shadylane");
    }

    #[test]
    fn test_block_then_lot() {
        let p = LegalParser::new();
        let legal = p.parse("Block 3 Lot 12 Shadylane").unwrap();
        assert_eq!(legal.lot, Some(12));
        assert_eq!(legal.block, Some(3));
    }

    #[test]
    fn test_duplicate_keyword_last_wins() {
        let p = LegalParser::new();
        let legal = p.parse("Lot 12 Lot 9 Shadylane").unwrap();
        assert_eq!(legal.lot, Some(9));
        assert_eq!(legal.block, None);
    }

    #[test]
    fn test_subdivision_kept_verbatim() {
        let p = LegalParser::new();
        let legal = p.parse("Lot 1 Pleasant Valley Estates Ph II").unwrap();
        assert_eq!(legal.subdivision, "Pleasant Valley Estates Ph II");
    }

    #[test]
    fn test_pattern_mismatch() {
        let p = LegalParser::new();
        assert!(matches!(
            p.parse("123 Main Street"),
            Err(LegalParseError::PatternMismatch(_))
        ));
    }

    #[test]
    fn test_number_overflow() {
        let p = LegalParser::new();
        let text = format!("Lot {}0 Shadylane", i64::MAX);
        assert!(matches!(
            p.parse(&text),
            Err(LegalParseError::BadNumber(_))
        ));
    }
}
