//! # Verification State Machine
//!
//! The small set of states a verification attempt moves through, plus the
//! machine-readable reason and error codes the presentation layer renders.
//!
//! Transitions are driven solely by the orchestrator; everything here is
//! observable data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hcert_core::{PersonName, Uvci};
use hcert_rules::ValidityWindow;

/// The state of one verification attempt.
///
/// Exactly one state is active per attempt at any instant. An attempt
/// starts in `Loading` and reaches exactly one of the three terminal
/// states; a retry starts a fresh attempt in `Loading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    /// Evaluation is in progress.
    Loading,

    /// Every check passed. Carries the validity window and identity
    /// payload for display.
    Success(Box<VerifiedCertificate>),

    /// A specific acceptance rule failed. Recoverable by retry only if the
    /// underlying data changes.
    Invalid {
        /// Which rule failed.
        reason: InvalidReason,
    },

    /// Evaluation could not complete. Distinct from a rule failure: the
    /// certificate was not judged, the infrastructure failed.
    Error {
        /// What failed.
        code: ErrorCode,
        /// Whether the UI should offer a retry.
        retryable: bool,
    },
}

impl VerificationState {
    /// Whether this is the in-progress state.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether this is a terminal state for its attempt.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// The canonical string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Success(_) => "SUCCESS",
            Self::Invalid { .. } => "INVALID",
            Self::Error { .. } => "ERROR",
        }
    }

    /// The machine-readable code shown alongside a failed verification,
    /// if this state carries one.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Loading | Self::Success(_) => None,
            Self::Invalid { reason } => Some(reason.code()),
            Self::Error { code, .. } => Some(code.as_str()),
        }
    }
}

impl std::fmt::Display for VerificationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of a successful verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedCertificate {
    /// The attempt that produced this result.
    pub attempt_id: Uuid,

    /// The holder's name.
    pub person: PersonName,

    /// The holder's date of birth, raw as issued.
    pub date_of_birth: String,

    /// The unique identifier of the verified entry.
    pub certificate_identifier: Uvci,

    /// The computed validity window of the verified entry.
    pub window: ValidityWindow,
}

/// Which acceptance rule failed.
///
/// Each variant maps to a stable snake_case code via
/// [`InvalidReason::code()`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidReason {
    /// The external signature/trust validation did not pass.
    SignatureInvalid {
        /// Detail from the trust collaborator.
        detail: String,
    },

    /// The entry targets a disease the verifier does not recognize.
    WrongDiseaseTarget,

    /// The entry's date field did not parse; validity cannot be
    /// determined.
    MissingEntryDate,

    /// The current instant is before the validity window opens.
    NotYetValid {
        /// When the entry becomes valid.
        valid_from: chrono::NaiveDateTime,
    },

    /// The current instant is after the validity window closed.
    NoLongerValid {
        /// When the entry stopped being valid.
        valid_until: chrono::NaiveDateTime,
    },

    /// The test entry's result is not "not detected".
    NegativeTestRequired,

    /// The vaccine product is not in the catalog (under the policy that
    /// treats a catalog miss as a rule failure).
    UnknownProduct {
        /// The unrecognized product code.
        product_code: String,
    },

    /// The payload carries no entry at all.
    EmptyCertificate,
}

impl InvalidReason {
    /// The stable machine-readable code for this reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SignatureInvalid { .. } => "signature_invalid",
            Self::WrongDiseaseTarget => "wrong_disease_target",
            Self::MissingEntryDate => "missing_entry_date",
            Self::NotYetValid { .. } => "not_yet_valid",
            Self::NoLongerValid { .. } => "no_longer_valid",
            Self::NegativeTestRequired => "negative_test_required",
            Self::UnknownProduct { .. } => "unknown_product",
            Self::EmptyCertificate => "empty_certificate",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// What failed when evaluation could not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The trust collaborator returned an infrastructure failure.
    TrustFetchFailed,
    /// The trust collaborator did not answer within the deadline.
    TrustFetchTimeout,
    /// The vaccine product is not in the catalog (under the policy that
    /// treats a catalog miss as an evaluation failure).
    CatalogMiss,
}

impl ErrorCode {
    /// The canonical string name of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrustFetchFailed => "TRUST_FETCH_FAILED",
            Self::TrustFetchTimeout => "TRUST_FETCH_TIMEOUT",
            Self::CatalogMiss => "CATALOG_MISS",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
