//! Japanese postal codes and address lookup results.
//!
//! Codes are accepted with or without hyphens (`123-4567`, `1234567`).
//! Only ASCII digits are valid; full-width digits are rejected rather than
//! converted.

use std::fmt;

use serde::{Deserialize, Serialize};

const POSTAL_CODE_DIGITS: usize = 7;
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 1000;

/// Remove every `-` from `raw`.
///
/// # Examples
/// ```
/// use invitation::domain::normalize_postal_code;
///
/// assert_eq!(normalize_postal_code("1-2-3-4-5-6-7"), "1234567");
/// ```
pub fn normalize_postal_code(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-').collect()
}

/// Whether `raw` normalises to exactly seven ASCII digits.
///
/// # Examples
/// ```
/// use invitation::domain::validate_postal_code;
///
/// assert!(validate_postal_code("123-4567"));
/// assert!(!validate_postal_code("１２３４５６７"));
/// ```
pub fn validate_postal_code(raw: &str) -> bool {
    let normalized = normalize_postal_code(raw);
    normalized.len() == POSTAL_CODE_DIGITS && normalized.bytes().all(|b| b.is_ascii_digit())
}

/// A validated, normalised seven-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostalCode(String);

/// Returned by [`PostalCode::parse`] for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("postal code must be seven ASCII digits, optionally hyphenated: {raw:?}")]
pub struct InvalidPostalCode {
    /// The rejected input.
    pub raw: String,
}

impl PostalCode {
    /// Validate and normalise `raw`.
    pub fn parse(raw: &str) -> Result<Self, InvalidPostalCode> {
        if validate_postal_code(raw) {
            Ok(Self(normalize_postal_code(raw)))
        } else {
            Err(InvalidPostalCode {
                raw: raw.to_owned(),
            })
        }
    }

    /// Borrow the seven digits.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup request forwarded to the postal-code API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCodeQuery {
    /// Code to look up.
    pub code: PostalCode,
    /// One-based result page.
    pub page: u32,
    /// Results per page, within `1..=1000`.
    pub limit: u32,
}

impl PostalCodeQuery {
    /// Build a query, applying defaults for absent paging values.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::{PostalCode, PostalCodeQuery};
    ///
    /// let code = PostalCode::parse("100-0001").expect("valid code");
    /// let query = PostalCodeQuery::new(code, None, Some(5000));
    /// assert_eq!((query.page, query.limit), (1, 1000));
    /// ```
    pub fn new(code: PostalCode, page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            code,
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

/// One address returned by the postal-code API.
///
/// The upstream payload carries more columns; unknown ones are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostalCodeAddress {
    /// Seven-digit code.
    #[serde(default)]
    pub zip_code: Option<String>,
    /// JIS prefecture code.
    #[serde(default)]
    pub pref_code: Option<String>,
    /// Prefecture name.
    #[serde(default)]
    pub pref_name: Option<String>,
    /// Prefecture reading in katakana.
    #[serde(default)]
    pub pref_kana: Option<String>,
    /// City code.
    #[serde(default)]
    pub city_code: Option<String>,
    /// City, ward or town name.
    #[serde(default)]
    pub city_name: Option<String>,
    /// City reading in katakana.
    #[serde(default)]
    pub city_kana: Option<String>,
    /// Town area name.
    #[serde(default)]
    pub town_name: Option<String>,
    /// Town reading in katakana.
    #[serde(default)]
    pub town_kana: Option<String>,
    /// Block or chome.
    #[serde(default)]
    pub block_name: Option<String>,
    /// Business name for business-specific codes.
    #[serde(default)]
    pub biz_name: Option<String>,
    /// Any trailing address detail.
    #[serde(default)]
    pub other_name: Option<String>,
    /// Fully assembled address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Paged lookup result, passed through to clients unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostalCodeLookup {
    /// Matching addresses.
    #[serde(default)]
    pub addresses: Vec<PostalCodeAddress>,
    /// Search mode reported upstream.
    #[serde(default)]
    pub searchtype: Option<String>,
    /// Page size used.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Total number of matches.
    #[serde(default)]
    pub count: Option<u32>,
    /// Current page.
    #[serde(default)]
    pub page: Option<u32>,
}
