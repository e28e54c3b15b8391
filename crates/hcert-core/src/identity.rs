//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers that appear in decoded health
//! certificates. These prevent accidental identifier confusion — you cannot
//! pass a vaccine product code where a certificate identifier is expected.
//!
//! ## Validation Policy
//!
//! Constructors validate shape (non-empty, length caps) but stay permissive
//! about issuer-specific formatting: certificates are issued by dozens of
//! authorities and over-strict validation here would reject real-world data
//! that the evaluation rules can still assess.

use serde::{Deserialize, Serialize};

use crate::error::HcertError;

/// Maximum accepted length of a unique certificate identifier.
const UVCI_MAX_LEN: usize = 80;

/// Unique Vaccination Certificate Identifier (UVCI).
///
/// The `ci` field of a certificate entry. Typically of the form
/// `URN:UVCI:01:CH:...` but the prefix is not mandated by every issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uvci(pub String);

impl Uvci {
    /// Validate and wrap a certificate identifier.
    ///
    /// # Errors
    ///
    /// Rejects empty identifiers and identifiers longer than 80 characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, HcertError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HcertError::InvalidIdentifier(
                "certificate identifier must not be empty".into(),
            ));
        }
        if trimmed.len() > UVCI_MAX_LEN {
            return Err(HcertError::InvalidIdentifier(format!(
                "certificate identifier exceeds {UVCI_MAX_LEN} characters: {} chars",
                trimmed.len()
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uvci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vaccine medicinal product code.
///
/// The `mp` field of a vaccination entry, e.g. `EU/1/20/1528`. Used as the
/// lookup key into the vaccine catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductCode(pub String);

impl ProductCode {
    /// Validate and wrap a product code.
    ///
    /// # Errors
    ///
    /// Rejects empty codes.
    pub fn new(raw: impl Into<String>) -> Result<Self, HcertError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HcertError::InvalidIdentifier(
                "product code must not be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the product code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The name of the certificate holder, in both display and machine-readable
/// (ICAO 9303 transliterated) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Family name as printed on the certificate.
    #[serde(rename = "fn")]
    pub family_name: String,

    /// Given name(s) as printed on the certificate.
    #[serde(rename = "gn")]
    pub given_name: String,

    /// Standardized (transliterated) family name.
    #[serde(rename = "fnt")]
    pub standardized_family_name: String,

    /// Standardized (transliterated) given name(s).
    #[serde(rename = "gnt", default, skip_serializing_if = "Option::is_none")]
    pub standardized_given_name: Option<String>,
}

impl PersonName {
    /// Render the machine-readable name line, `FAMILY<<GIVEN`.
    pub fn standardized_line(&self) -> String {
        match &self.standardized_given_name {
            Some(given) => format!("{}<<{}", self.standardized_family_name, given),
            None => self.standardized_family_name.clone(),
        }
    }
}
