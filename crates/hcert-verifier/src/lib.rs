//! # hcert-verifier — Verification State Machine and Orchestrator
//!
//! Drives one certificate-verification attempt end to end: resolve the
//! vaccine catalog record, run the pure acceptance rules, combine with the
//! external trust-validation result, and publish a [`VerificationState`].
//!
//! ## State Discipline
//!
//! Each attempt moves LOADING → exactly one of SUCCESS / INVALID / ERROR.
//! Retrying re-enters LOADING as a *fresh* attempt. Attempts carry sequence
//! numbers and publication is last-writer-wins: a stale attempt's result is
//! dropped, never published, so observers only ever see monotonically
//! fresher states.
//!
//! ## Failure Taxonomy
//!
//! - Rule failures (wrong disease target, outside the validity window,
//!   non-negative test, ...) → [`VerificationState::Invalid`] with a
//!   machine-readable reason.
//! - Infrastructure failures (trust fetch failed or timed out, catalog
//!   miss under the error policy) → [`VerificationState::Error`] with a
//!   retryable flag. A trust-fetch timeout surfaces as a retryable error,
//!   never as an indefinite LOADING.

pub mod clock;
pub mod http;
pub mod state;
pub mod trust;
pub mod verifier;

mod retry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use http::{HttpTrustValidator, TrustClientConfig, TrustClientError};
pub use state::{ErrorCode, InvalidReason, VerificationState, VerifiedCertificate};
pub use trust::{StaticTrustValidator, TrustError, TrustOutcome, TrustValidator};
pub use verifier::{StateSnapshot, UnknownProductPolicy, Verifier, VerifierConfig};
