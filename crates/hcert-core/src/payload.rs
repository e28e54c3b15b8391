//! # Decoded Certificate Payload Model
//!
//! The envelope produced by the external QR-decode / CBOR-parse collaborator.
//! Serde rename attributes map between Rust snake_case and the short JSON
//! field names of the certificate wire schema (`v`, `t`, `r`, `tg`, `mp`,
//! `dn`, `sd`, ...).
//!
//! ## Invariants
//!
//! - A payload is constructed once by the decoder and never mutated here.
//! - Date fields (`dt`, `sc`, `fr`) stay raw strings: whether they parse is
//!   an evaluation concern, not a deserialization concern. A payload with a
//!   corrupt date must still deserialize so its other entries remain
//!   displayable.
//! - Unknown fields are tolerated: the wire schema grows over time and an
//!   older verifier must not reject a newer certificate outright.

use serde::{Deserialize, Serialize};

use crate::identity::{PersonName, ProductCode, Uvci};

/// A decoded health-certificate payload.
///
/// Carries the holder's identity and up to three entry families:
/// vaccinations, tests, and recoveries. In practice issuers emit exactly one
/// entry per certificate, but the schema permits several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificatePayload {
    /// Schema version of the payload (e.g. `1.3.0`).
    #[serde(rename = "ver")]
    pub version: String,

    /// The holder's name.
    #[serde(rename = "nam")]
    pub person: PersonName,

    /// Date of birth, raw ISO-8601 calendar date string.
    #[serde(rename = "dob")]
    pub date_of_birth: String,

    /// Vaccination entries.
    #[serde(rename = "v", default, skip_serializing_if = "Vec::is_empty")]
    pub vaccinations: Vec<VaccinationEntry>,

    /// Test entries.
    #[serde(rename = "t", default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestEntry>,

    /// Recovery entries.
    #[serde(rename = "r", default, skip_serializing_if = "Vec::is_empty")]
    pub recoveries: Vec<RecoveryEntry>,
}

impl CertificatePayload {
    /// Whether the payload carries no entry at all.
    ///
    /// An empty payload can still be displayed (it names a person) but can
    /// never verify successfully.
    pub fn is_empty(&self) -> bool {
        self.vaccinations.is_empty() && self.tests.is_empty() && self.recoveries.is_empty()
    }

    /// The unique identifier of the payload's primary entry, in the fixed
    /// family order vaccination → test → recovery. `None` for an empty
    /// payload.
    pub fn primary_entry_identifier(&self) -> Option<&Uvci> {
        self.vaccinations
            .first()
            .map(|v| &v.certificate_identifier)
            .or_else(|| self.tests.first().map(|t| &t.certificate_identifier))
            .or_else(|| self.recoveries.first().map(|r| &r.certificate_identifier))
    }
}

/// One dose record from a vaccination certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationEntry {
    /// Disease or agent targeted, as a code (e.g. `840539006`).
    #[serde(rename = "tg")]
    pub disease_target: String,

    /// Vaccine or prophylaxis type code.
    #[serde(rename = "vp")]
    pub prophylaxis: String,

    /// Medicinal product code — the vaccine catalog lookup key.
    #[serde(rename = "mp")]
    pub product_code: ProductCode,

    /// Marketing authorization holder code.
    #[serde(rename = "ma")]
    pub auth_holder: String,

    /// Dose number in the series (1-based).
    #[serde(rename = "dn")]
    pub dose_number: u32,

    /// Total number of doses the series on this certificate expects.
    ///
    /// Compared against catalog data to detect regimens adjusted for a
    /// prior infection: fewer recorded total doses than the product
    /// normally requires implies the holder had a past infection.
    #[serde(rename = "sd")]
    pub total_doses: u32,

    /// Vaccination date, raw ISO-8601 calendar date string (no time).
    #[serde(rename = "dt")]
    pub vaccination_date: String,

    /// Country of vaccination, ISO 3166-1 alpha-2 code.
    #[serde(rename = "co")]
    pub country: String,

    /// Certificate issuer.
    #[serde(rename = "is")]
    pub issuer: String,

    /// Unique certificate identifier.
    #[serde(rename = "ci")]
    pub certificate_identifier: Uvci,
}

/// One test record from a test certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEntry {
    /// Disease or agent targeted, as a code.
    #[serde(rename = "tg")]
    pub disease_target: String,

    /// Test type code (`LP6464-4` for NAAT/PCR, `LP217198-3` for rapid
    /// antigen).
    #[serde(rename = "tt")]
    pub test_type: String,

    /// Test name (NAAT tests only).
    #[serde(rename = "nm", default, skip_serializing_if = "Option::is_none")]
    pub test_name: Option<String>,

    /// Test device identifier (rapid antigen tests only).
    #[serde(rename = "ma", default, skip_serializing_if = "Option::is_none")]
    pub test_device: Option<String>,

    /// Sample collection instant, raw RFC 3339 date-time string.
    #[serde(rename = "sc")]
    pub sample_collection: String,

    /// Test result code (`260415000` = not detected).
    #[serde(rename = "tr")]
    pub result: String,

    /// Testing centre or facility.
    #[serde(rename = "tc", default, skip_serializing_if = "Option::is_none")]
    pub testing_centre: Option<String>,

    /// Country of test, ISO 3166-1 alpha-2 code.
    #[serde(rename = "co")]
    pub country: String,

    /// Certificate issuer.
    #[serde(rename = "is")]
    pub issuer: String,

    /// Unique certificate identifier.
    #[serde(rename = "ci")]
    pub certificate_identifier: Uvci,
}

/// One recovery record from a recovery certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryEntry {
    /// Disease or agent the holder recovered from, as a code.
    #[serde(rename = "tg")]
    pub disease_target: String,

    /// Date of the first positive test result, raw ISO-8601 calendar date.
    #[serde(rename = "fr")]
    pub first_positive_result: String,

    /// Issuer-claimed start of validity. Not consumed by the acceptance
    /// rules, which compute their own window from `fr`; retained for
    /// display.
    #[serde(rename = "df", default, skip_serializing_if = "Option::is_none")]
    pub claimed_valid_from: Option<String>,

    /// Issuer-claimed end of validity. See `claimed_valid_from`.
    #[serde(rename = "du", default, skip_serializing_if = "Option::is_none")]
    pub claimed_valid_until: Option<String>,

    /// Country of the first positive test, ISO 3166-1 alpha-2 code.
    #[serde(rename = "co")]
    pub country: String,

    /// Certificate issuer.
    #[serde(rename = "is")]
    pub issuer: String,

    /// Unique certificate identifier.
    #[serde(rename = "ci")]
    pub certificate_identifier: Uvci,
}
