//! Application and patent number normalization.
//!
//! Serial numbers arrive as free text: `16123456`, `US0506853`,
//! `14/412,875`, `PCTUS2004027676`, `PCT/US2004/027676`. Before they are
//! used as a URL path segment they are reduced to the form the ODP API
//! indexes. PCT numbers are reshaped into `PCT<COUNTRY><YY><SEQ>`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::OdpError;

static PCT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PCT([A-Z]{2})?(?:20)?(\d{2})(\d+)$").expect("PCT pattern is valid")
});

const DEFAULT_PCT_COUNTRY: &str = "US";

/// A PCT application number split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PctNumber {
    pub country: String,
    pub year: String,
    pub sequence: String,
}

impl PctNumber {
    /// The alternate form tried once after a not-found lookup: the sequence
    /// without its leading zeros. `None` when the sequence has no leading zero.
    pub fn without_leading_zero(&self) -> Option<PctNumber> {
        if !self.sequence.starts_with('0') {
            return None;
        }
        let trimmed = self.sequence.trim_start_matches('0');
        let sequence = if trimmed.is_empty() { "0" } else { trimmed };
        Some(PctNumber {
            country: self.country.clone(),
            year: self.year.clone(),
            sequence: sequence.to_string(),
        })
    }
}

impl fmt::Display for PctNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PCT{}{}{}", self.country, self.year, self.sequence)
    }
}

/// A normalized application identifier, ready for use as a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationId {
    Serial(String),
    Pct(PctNumber),
}

impl ApplicationId {
    /// Normalize free-form input.
    ///
    /// Separators (`,` `/` whitespace) are dropped and a single leading `US`
    /// is stripped. Input that then starts with `PCT` must match the PCT
    /// layout or an `InvalidIdentifier` error is returned.
    pub fn parse(input: &str) -> Result<Self, OdpError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '/')
            .collect();
        let stripped = compact.strip_prefix("US").unwrap_or(&compact);

        if !stripped.starts_with("PCT") {
            return Ok(ApplicationId::Serial(stripped.to_string()));
        }

        let caps = PCT_PATTERN
            .captures(stripped)
            .ok_or_else(|| OdpError::InvalidIdentifier(input.to_string()))?;
        let country = caps
            .get(1)
            .map_or(DEFAULT_PCT_COUNTRY, |m| m.as_str())
            .to_string();
        Ok(ApplicationId::Pct(PctNumber {
            country,
            year: caps[2].to_string(),
            sequence: caps[3].to_string(),
        }))
    }

    /// The identifier to retry with after a 404, if any.
    pub fn fallback(&self) -> Option<ApplicationId> {
        match self {
            ApplicationId::Serial(_) => None,
            ApplicationId::Pct(pct) => pct.without_leading_zero().map(ApplicationId::Pct),
        }
    }

    pub fn is_pct(&self) -> bool {
        matches!(self, ApplicationId::Pct(_))
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationId::Serial(s) => f.write_str(s),
            ApplicationId::Pct(pct) => fmt::Display::fmt(pct, f),
        }
    }
}

/// Reduce a patent number such as `US9,022,434` to its digits.
pub fn sanitize_patent_number(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
