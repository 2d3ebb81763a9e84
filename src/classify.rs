//! Address string classification.
//!
//! The source spreadsheets mix two address grammars in one column:
//! ordinary street addresses ("123 Main Street") and cadastral legal
//! descriptions ("Lot 12 Block 3 Shadylane"). Each routes to a
//! different geocoding service, so every row is classified first.

use regex::Regex;

/// Where a raw address string should be resolved, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Matches the street-address grammar; geocode via the locator.
    StreetAddress,
    /// Matches the lot/block grammar; geocode via the parcel service.
    LegalDescription,
    /// Matches neither; the row passes through unresolved.
    Unclassifiable,
}

/// Compiled grammar patterns, built once and reused for every row.
pub struct Classifier {
    street: Regex,
    legal: Regex,
}

/// House number, street name, then either a named suffix or a short
/// numbered-street suffix ("... Highway 10" style). Anchored at both
/// ends: a substring match is not a classification.
const STREET_PATTERN: &str =
    r"^\d+ \D+ (?:Road|Drive|Court|Cove|Boulevard|Street|Circle|\d{1,3})$";

/// One or two "Lot N " / "Block N " groups, then the subdivision name
/// (free text, no digits) running to the end of the string.
pub(crate) const LEGAL_PATTERN: &str = r"^((Lot|Block) (\d+) )((Lot|Block) (\d+) )?(\D+)$";

impl Classifier {
    pub fn new() -> Self {
        Self {
            street: Regex::new(STREET_PATTERN).expect("street pattern is valid"),
            legal: Regex::new(LEGAL_PATTERN).expect("legal pattern is valid"),
        }
    }

    /// Classify a raw address string.
    ///
    /// The street pattern is tried first; a string that satisfies both
    /// grammars is a `StreetAddress`. That ordering is part of the
    /// contract, not an implementation accident.
    pub fn classify(&self, text: &str) -> Classification {
        if self.street.is_match(text) {
            return Classification::StreetAddress;
        }
        if self.legal.is_match(text) {
            return Classification::LegalDescription;
        }
        Classification::Unclassifiable
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
