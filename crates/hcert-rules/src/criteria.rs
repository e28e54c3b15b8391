//! # Acceptance Criteria — Named Thresholds
//!
//! The jurisdiction-specific thresholds the entry evaluators apply. The
//! defaults are the values this stack ships with; a deployment tracking a
//! different rule set constructs its own [`AcceptanceCriteria`].

use serde::{Deserialize, Serialize};

/// Disease-agent code the verifier recognizes (SARS-CoV-2).
pub const TARGET_DISEASE: &str = "840539006";

/// Test type code for nucleic-acid amplification tests (PCR).
pub const TEST_TYPE_PCR: &str = "LP6464-4";

/// Test type code for rapid antigen tests.
pub const TEST_TYPE_RAT: &str = "LP217198-3";

/// Test result code for "not detected" — a negative result.
pub const TEST_RESULT_NOT_DETECTED: &str = "260415000";

/// Named acceptance thresholds for certificate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceCriteria {
    /// Disease-agent code an entry must target to be accepted.
    pub target_disease: String,

    /// Days after injection before a single-dose regimen becomes valid.
    /// Single-shot vaccines need a post-injection immunity ramp-up.
    pub single_dose_validity_offset_days: u32,

    /// Days a vaccination entry stays valid, counted from the vaccination
    /// date itself.
    pub vaccine_immunity_duration_days: u32,

    /// Hours a PCR test result stays valid after sample collection.
    pub pcr_test_validity_hours: u32,

    /// Hours a rapid antigen test result stays valid after sample
    /// collection.
    pub rat_test_validity_hours: u32,

    /// Days after the first positive result before a recovery entry
    /// becomes valid.
    pub recovery_offset_valid_from_days: u32,

    /// Days after the first positive result at which a recovery entry
    /// stops being valid.
    pub recovery_validity_duration_days: u32,
}

impl Default for AcceptanceCriteria {
    fn default() -> Self {
        Self {
            target_disease: TARGET_DISEASE.to_string(),
            single_dose_validity_offset_days: 15,
            vaccine_immunity_duration_days: 180,
            pcr_test_validity_hours: 72,
            rat_test_validity_hours: 48,
            recovery_offset_valid_from_days: 10,
            recovery_validity_duration_days: 179,
        }
    }
}
