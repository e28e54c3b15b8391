//! # Certificate Holder
//!
//! Wraps a decoded payload together with the person-identity projections the
//! verification flow needs. A holder is owned by the orchestrator for the
//! duration of one verification flow and is immutable.

use serde::{Deserialize, Serialize};

use crate::identity::PersonName;
use crate::payload::CertificatePayload;
use crate::temporal;

/// A decoded certificate plus its holder's identity, as handed to the
/// verification pipeline.
///
/// Serializes transparently as the payload itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateHolder {
    payload: CertificatePayload,
}

impl CertificateHolder {
    /// Wrap a decoded payload.
    pub fn new(payload: CertificatePayload) -> Self {
        Self { payload }
    }

    /// The decoded payload.
    pub fn payload(&self) -> &CertificatePayload {
        &self.payload
    }

    /// The holder's name.
    pub fn person_name(&self) -> &PersonName {
        &self.payload.person
    }

    /// The holder's date of birth, raw as issued.
    pub fn date_of_birth(&self) -> &str {
        &self.payload.date_of_birth
    }

    /// The holder's date of birth formatted for display (`20.02.1985`),
    /// echoing the raw string when unparseable.
    pub fn formatted_date_of_birth(&self) -> String {
        temporal::format_display_date(&self.payload.date_of_birth)
    }
}
