//! # Trust Validation — Collaborator Seam
//!
//! Signature and issuer-trust validation is performed outside this stack
//! (COSE verification against a trust list). The verifier consumes only the
//! outcome: trusted, untrusted with a reason, or an infrastructure failure
//! with a retryable flag.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use hcert_core::CertificateHolder;

/// The trust collaborator's verdict on a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustOutcome {
    /// Signature and issuer trust check out.
    Trusted,
    /// The certificate is not trusted.
    Untrusted {
        /// Why — e.g. unknown signing key, revoked certificate.
        reason: String,
    },
}

/// An infrastructure failure while obtaining the trust verdict.
///
/// Distinct from [`TrustOutcome::Untrusted`]: the certificate was not
/// judged, the check itself failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("trust validation failed: {detail}")]
pub struct TrustError {
    /// Diagnostic detail.
    pub detail: String,
    /// Whether retrying the check can plausibly succeed.
    pub retryable: bool,
}

/// The trust-validation collaborator.
///
/// Implementations perform the long-latency work (trust-list fetch,
/// cryptographic checks) — the one suspension point in the verification
/// pipeline. Implementations must be cheap to call concurrently; the
/// orchestrator may race a retry against an in-flight call.
pub trait TrustValidator: Send + Sync + 'static {
    /// Obtain the trust verdict for the given certificate.
    fn validate(
        &self,
        holder: Arc<CertificateHolder>,
    ) -> impl Future<Output = Result<TrustOutcome, TrustError>> + Send;
}

/// A trust validator with a fixed answer.
///
/// For offline operation (the caller vouches for trust out of band) and
/// for tests.
#[derive(Debug, Clone)]
pub struct StaticTrustValidator {
    verdict: Result<TrustOutcome, TrustError>,
}

impl StaticTrustValidator {
    /// Always answers `Trusted`.
    pub fn trusted() -> Self {
        Self {
            verdict: Ok(TrustOutcome::Trusted),
        }
    }

    /// Always answers `Untrusted` with the given reason.
    pub fn untrusted(reason: impl Into<String>) -> Self {
        Self {
            verdict: Ok(TrustOutcome::Untrusted {
                reason: reason.into(),
            }),
        }
    }

    /// Always fails with the given infrastructure error.
    pub fn failing(detail: impl Into<String>, retryable: bool) -> Self {
        Self {
            verdict: Err(TrustError {
                detail: detail.into(),
                retryable,
            }),
        }
    }
}

impl TrustValidator for StaticTrustValidator {
    async fn validate(
        &self,
        _holder: Arc<CertificateHolder>,
    ) -> Result<TrustOutcome, TrustError> {
        self.verdict.clone()
    }
}
