//! # Verification Orchestrator
//!
//! Drives one verification attempt end to end: empty-payload check, trust
//! validation (the single suspension point, bounded by a timeout), catalog
//! resolution, pure rule evaluation, and publication of the resulting
//! [`VerificationState`].
//!
//! ## Attempt Sequencing
//!
//! Every call to [`Verifier::start_verification`] /
//! [`Verifier::retry_verification`] allocates the next attempt sequence
//! number, publishes LOADING for it, aborts any in-flight attempt, and
//! spawns the new one. Publication goes through a single writer guarded by
//! the sequence number: a result whose attempt is older than the newest
//! published attempt is dropped. Observers therefore only ever see
//! monotonically fresher states, and two overlapping attempts can never
//! interleave their partial results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use hcert_catalog::{CatalogLookup, VaccineCatalog};
use hcert_core::{CertificateHolder, RecoveryEntry, TestEntry, VaccinationEntry};
use hcert_rules::{
    AcceptanceCriteria, RecoveryAssessment, TestAssessment, VaccinationAssessment, WindowStatus,
};

use crate::clock::Clock;
use crate::state::{ErrorCode, InvalidReason, VerificationState, VerifiedCertificate};
use crate::trust::{TrustOutcome, TrustValidator};

/// What a catalog miss means for verification.
///
/// An unrecognized product code is ambiguous: the certificate may be
/// fraudulent, or the catalog may simply predate the product. The policy
/// is explicit so deployments choose rather than inherit a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownProductPolicy {
    /// Treat the miss as a rule failure (INVALID `unknown_product`).
    #[default]
    Invalid,
    /// Treat the miss as an evaluation failure (ERROR `CATALOG_MISS`,
    /// not retryable until the catalog changes).
    Error,
}

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Acceptance thresholds applied by the entry evaluators.
    pub criteria: AcceptanceCriteria,
    /// Catalog-miss policy.
    pub unknown_product_policy: UnknownProductPolicy,
    /// Deadline for the trust collaborator. Elapsing surfaces as a
    /// retryable ERROR, never as an indefinite LOADING.
    pub trust_timeout: Duration,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            criteria: AcceptanceCriteria::default(),
            unknown_product_policy: UnknownProductPolicy::default(),
            trust_timeout: Duration::from_secs(15),
        }
    }
}

/// A published state tagged with the attempt that produced it.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    /// Monotonic attempt sequence number. 0 is the pre-first-attempt idle
    /// snapshot.
    pub attempt: u64,
    /// The state.
    pub state: VerificationState,
}

/// The verification orchestrator.
///
/// Cheap to clone; clones share the attempt counter and the published
/// state. The catalog is read-only and shared without locking.
pub struct Verifier<T, C> {
    inner: Arc<Inner<T, C>>,
}

impl<T, C> Clone for Verifier<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T, C> {
    catalog: Arc<VaccineCatalog>,
    config: VerifierConfig,
    trust: T,
    clock: C,
    attempt_seq: AtomicU64,
    publisher: watch::Sender<StateSnapshot>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<T, C> std::fmt::Debug for Verifier<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("attempt", &self.inner.attempt_seq.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<T, C> Verifier<T, C>
where
    T: TrustValidator,
    C: Clock,
{
    /// Build an orchestrator.
    pub fn new(catalog: Arc<VaccineCatalog>, config: VerifierConfig, trust: T, clock: C) -> Self {
        let (publisher, _) = watch::channel(StateSnapshot {
            attempt: 0,
            state: VerificationState::Loading,
        });
        Self {
            inner: Arc::new(Inner {
                catalog,
                config,
                trust,
                clock,
                attempt_seq: AtomicU64::new(0),
                publisher,
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Observe published states. Receivers see only monotonically fresher
    /// snapshots.
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.inner.publisher.subscribe()
    }

    /// The most recently published state.
    pub fn current_state(&self) -> VerificationState {
        self.inner.publisher.borrow().state.clone()
    }

    /// Start a verification attempt for `holder`.
    ///
    /// Publishes LOADING immediately and runs the attempt on a spawned
    /// task. Any in-flight previous attempt is aborted; if its result
    /// nevertheless races in, the sequence guard drops it. Returns the
    /// attempt sequence number.
    ///
    /// Must be called within a Tokio runtime.
    pub fn start_verification(&self, holder: &CertificateHolder) -> u64 {
        let seq = self.inner.attempt_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(attempt = seq, "starting certificate verification");

        self.inner.publish(seq, VerificationState::Loading);

        let inner = Arc::clone(&self.inner);
        let holder = Arc::new(holder.clone());
        let handle = tokio::spawn(async move {
            let state = run_attempt(&inner, holder, seq).await;
            tracing::debug!(attempt = seq, state = %state, "verification attempt finished");
            inner.publish(seq, state);
        });

        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = in_flight.replace(handle) {
            previous.abort();
        }
        seq
    }

    /// Re-validate after a terminal state. Identical to
    /// [`Verifier::start_verification`] apart from intent: it restarts
    /// exactly one LOADING cycle and supersedes any in-flight attempt.
    pub fn retry_verification(&self, holder: &CertificateHolder) -> u64 {
        tracing::info!("retrying certificate verification");
        self.start_verification(holder)
    }

    /// Run one attempt and wait for its terminal state.
    ///
    /// Convenience for callers that want a one-shot answer instead of
    /// observing the channel. If a newer attempt supersedes this one, the
    /// newer attempt's terminal state is returned.
    pub async fn verify_to_completion(&self, holder: &CertificateHolder) -> VerificationState {
        let seq = self.start_verification(holder);
        let mut receiver = self.subscribe();
        loop {
            {
                let snapshot = receiver.borrow_and_update();
                if snapshot.attempt >= seq && snapshot.state.is_terminal() {
                    return snapshot.state.clone();
                }
            }
            if receiver.changed().await.is_err() {
                // Publisher gone; report what we last saw.
                return self.current_state();
            }
        }
    }
}

impl<T, C> Inner<T, C> {
    /// Publish `state` for attempt `seq` unless a newer attempt has
    /// already published. Single writer, last-writer-wins.
    fn publish(&self, seq: u64, state: VerificationState) {
        self.publisher.send_if_modified(|current| {
            if seq < current.attempt {
                tracing::debug!(
                    attempt = seq,
                    newest = current.attempt,
                    "dropping stale verification result"
                );
                return false;
            }
            *current = StateSnapshot {
                attempt: seq,
                state,
            };
            true
        });
    }
}

/// Evaluate one attempt to its terminal state.
async fn run_attempt<T, C>(
    inner: &Inner<T, C>,
    holder: Arc<CertificateHolder>,
    seq: u64,
) -> VerificationState
where
    T: TrustValidator,
    C: Clock,
{
    if holder.payload().is_empty() {
        return VerificationState::Invalid {
            reason: InvalidReason::EmptyCertificate,
        };
    }

    // Trust validation — the single suspension point, bounded by the
    // configured deadline.
    let trust_result = tokio::time::timeout(
        inner.config.trust_timeout,
        inner.trust.validate(Arc::clone(&holder)),
    )
    .await;

    let outcome = match trust_result {
        Err(_elapsed) => {
            tracing::warn!(attempt = seq, "trust validation timed out");
            return VerificationState::Error {
                code: ErrorCode::TrustFetchTimeout,
                retryable: true,
            };
        }
        Ok(Err(e)) => {
            tracing::warn!(attempt = seq, retryable = e.retryable, "trust validation failed: {e}");
            return VerificationState::Error {
                code: ErrorCode::TrustFetchFailed,
                retryable: e.retryable,
            };
        }
        Ok(Ok(outcome)) => outcome,
    };

    if let TrustOutcome::Untrusted { reason } = outcome {
        return VerificationState::Invalid {
            reason: InvalidReason::SignatureInvalid { detail: reason },
        };
    }

    let now = inner.clock.now();
    let payload = holder.payload();

    // Primary entry in the fixed family order; issuers emit one entry per
    // certificate.
    if let Some(entry) = payload.vaccinations.first() {
        evaluate_vaccination(inner, &holder, entry, now, seq)
    } else if let Some(entry) = payload.tests.first() {
        evaluate_test(inner, &holder, entry, now)
    } else if let Some(entry) = payload.recoveries.first() {
        evaluate_recovery(inner, &holder, entry, now)
    } else {
        VerificationState::Invalid {
            reason: InvalidReason::EmptyCertificate,
        }
    }
}

fn evaluate_vaccination<T, C>(
    inner: &Inner<T, C>,
    holder: &CertificateHolder,
    entry: &VaccinationEntry,
    now: chrono::NaiveDateTime,
    seq: u64,
) -> VerificationState {
    let assessment = VaccinationAssessment::new(entry);
    let criteria = &inner.config.criteria;

    if !assessment.is_target_disease_correct(criteria) {
        return VerificationState::Invalid {
            reason: InvalidReason::WrongDiseaseTarget,
        };
    }

    let vaccine = match inner.catalog.lookup(&entry.product_code) {
        CatalogLookup::Found(vaccine) => vaccine,
        CatalogLookup::NotFound => {
            tracing::warn!(
                attempt = seq,
                product = %entry.product_code,
                "vaccine product not in catalog"
            );
            return match inner.config.unknown_product_policy {
                UnknownProductPolicy::Invalid => VerificationState::Invalid {
                    reason: InvalidReason::UnknownProduct {
                        product_code: entry.product_code.to_string(),
                    },
                },
                UnknownProductPolicy::Error => VerificationState::Error {
                    code: ErrorCode::CatalogMiss,
                    retryable: false,
                },
            };
        }
    };

    if assessment.vaccine_date().is_none() {
        return VerificationState::Invalid {
            reason: InvalidReason::MissingEntryDate,
        };
    }

    let window = assessment.validity_window(vaccine, criteria);
    window_verdict(window, now, holder, entry.certificate_identifier.clone())
}

fn evaluate_test<T, C>(
    inner: &Inner<T, C>,
    holder: &CertificateHolder,
    entry: &TestEntry,
    now: chrono::NaiveDateTime,
) -> VerificationState {
    let assessment = TestAssessment::new(entry);
    let criteria = &inner.config.criteria;

    if !assessment.is_target_disease_correct(criteria) {
        return VerificationState::Invalid {
            reason: InvalidReason::WrongDiseaseTarget,
        };
    }

    if !assessment.is_negative() {
        return VerificationState::Invalid {
            reason: InvalidReason::NegativeTestRequired,
        };
    }

    if assessment.sample_collection_date().is_none() {
        return VerificationState::Invalid {
            reason: InvalidReason::MissingEntryDate,
        };
    }

    let window = assessment.validity_window(criteria);
    window_verdict(window, now, holder, entry.certificate_identifier.clone())
}

fn evaluate_recovery<T, C>(
    inner: &Inner<T, C>,
    holder: &CertificateHolder,
    entry: &RecoveryEntry,
    now: chrono::NaiveDateTime,
) -> VerificationState {
    let assessment = RecoveryAssessment::new(entry);
    let criteria = &inner.config.criteria;

    if !assessment.is_target_disease_correct(criteria) {
        return VerificationState::Invalid {
            reason: InvalidReason::WrongDiseaseTarget,
        };
    }

    if assessment.first_positive_result().is_none() {
        return VerificationState::Invalid {
            reason: InvalidReason::MissingEntryDate,
        };
    }

    let window = assessment.validity_window(criteria);
    window_verdict(window, now, holder, entry.certificate_identifier.clone())
}

/// Map a computed window onto the terminal state for `now`.
fn window_verdict(
    window: hcert_rules::ValidityWindow,
    now: chrono::NaiveDateTime,
    holder: &CertificateHolder,
    certificate_identifier: hcert_core::Uvci,
) -> VerificationState {
    match window.status_at(now) {
        WindowStatus::Indeterminate => VerificationState::Invalid {
            reason: InvalidReason::MissingEntryDate,
        },
        WindowStatus::NotYetValid => {
            // status_at only yields this with both bounds present.
            let valid_from = window.valid_from.unwrap_or(now);
            VerificationState::Invalid {
                reason: InvalidReason::NotYetValid { valid_from },
            }
        }
        WindowStatus::Expired => {
            let valid_until = window.valid_until.unwrap_or(now);
            VerificationState::Invalid {
                reason: InvalidReason::NoLongerValid { valid_until },
            }
        }
        WindowStatus::Valid => VerificationState::Success(Box::new(VerifiedCertificate {
            attempt_id: Uuid::new_v4(),
            person: holder.person_name().clone(),
            date_of_birth: holder.date_of_birth().to_string(),
            certificate_identifier,
            window,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::trust::{StaticTrustValidator, TrustError};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;
    use std::future::Future;

    fn instant(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn vaccination_holder(dn: u32, sd: u32, dt: &str, mp: &str) -> CertificateHolder {
        let payload = serde_json::from_value(json!({
            "ver": "1.3.0",
            "nam": {"fn": "Rochat", "gn": "Marie", "fnt": "ROCHAT", "gnt": "MARIE"},
            "dob": "1985-02-20",
            "v": [{
                "tg": "840539006",
                "vp": "1119349007",
                "mp": mp,
                "ma": "ORG-100030215",
                "dn": dn,
                "sd": sd,
                "dt": dt,
                "co": "CH",
                "is": "Bundesamt für Gesundheit (BAG)",
                "ci": "URN:UVCI:01:CH:2987CC9617DD5593806D4285"
            }]
        }))
        .unwrap();
        CertificateHolder::new(payload)
    }

    fn test_holder(tr: &str) -> CertificateHolder {
        let payload = serde_json::from_value(json!({
            "ver": "1.3.0",
            "nam": {"fn": "Rochat", "gn": "Marie", "fnt": "ROCHAT", "gnt": "MARIE"},
            "dob": "1985-02-20",
            "t": [{
                "tg": "840539006",
                "tt": "LP6464-4",
                "sc": "2021-07-31T18:00:00Z",
                "tr": tr,
                "co": "CH",
                "is": "Bundesamt für Gesundheit (BAG)",
                "ci": "URN:UVCI:01:CH:F0FDABC092A5D5098B3CB3D3"
            }]
        }))
        .unwrap();
        CertificateHolder::new(payload)
    }

    fn empty_holder() -> CertificateHolder {
        let payload = serde_json::from_value(json!({
            "ver": "1.3.0",
            "nam": {"fn": "Rochat", "gn": "Marie", "fnt": "ROCHAT", "gnt": "MARIE"},
            "dob": "1985-02-20"
        }))
        .unwrap();
        CertificateHolder::new(payload)
    }

    fn verifier_at<T: TrustValidator>(
        trust: T,
        now: NaiveDateTime,
    ) -> Verifier<T, FixedClock> {
        Verifier::new(
            Arc::new(VaccineCatalog::builtin()),
            VerifierConfig::default(),
            trust,
            FixedClock(now),
        )
    }

    #[tokio::test]
    async fn two_dose_certificate_verifies_inside_window() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528"))
            .await;

        let VerificationState::Success(cert) = state else {
            panic!("expected SUCCESS, got {state}");
        };
        assert_eq!(cert.person.family_name, "Rochat");
        assert_eq!(
            cert.window.valid_from,
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(
            cert.window.valid_until,
            NaiveDate::from_ymd_opt(2021, 11, 28).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[tokio::test]
    async fn single_dose_certificate_not_yet_valid_during_ramp_up() {
        // Janssen on 2021-06-01 becomes valid 2021-06-16; checked 06-10.
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 6, 10));
        let state = verifier
            .verify_to_completion(&vaccination_holder(1, 1, "2021-06-01", "EU/1/20/1525"))
            .await;

        let VerificationState::Invalid {
            reason: InvalidReason::NotYetValid { valid_from },
        } = state
        else {
            panic!("expected INVALID not_yet_valid, got {state}");
        };
        assert_eq!(
            valid_from,
            NaiveDate::from_ymd_opt(2021, 6, 16).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn expired_certificate_is_no_longer_valid() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2022, 3, 1));
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528"))
            .await;
        assert!(matches!(
            state,
            VerificationState::Invalid {
                reason: InvalidReason::NoLongerValid { .. }
            }
        ));
    }

    #[tokio::test]
    async fn untrusted_signature_is_invalid_not_error() {
        let verifier = verifier_at(
            StaticTrustValidator::untrusted("unknown signing key"),
            instant(2021, 8, 1),
        );
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528"))
            .await;

        let VerificationState::Invalid {
            reason: InvalidReason::SignatureInvalid { detail },
        } = state
        else {
            panic!("expected INVALID signature_invalid, got {state}");
        };
        assert_eq!(detail, "unknown signing key");
    }

    #[tokio::test]
    async fn trust_infrastructure_failure_is_error_with_flag() {
        let verifier = verifier_at(
            StaticTrustValidator::failing("trust list unavailable", true),
            instant(2021, 8, 1),
        );
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528"))
            .await;
        assert_eq!(
            state,
            VerificationState::Error {
                code: ErrorCode::TrustFetchFailed,
                retryable: true,
            }
        );
    }

    #[tokio::test]
    async fn wrong_disease_target_is_rejected() {
        let mut holder = vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528");
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));

        // Repoint the entry at a different disease code.
        let mut payload = holder.payload().clone();
        payload.vaccinations[0].disease_target = "840544004".into();
        holder = CertificateHolder::new(payload);

        let state = verifier.verify_to_completion(&holder).await;
        assert!(matches!(
            state,
            VerificationState::Invalid {
                reason: InvalidReason::WrongDiseaseTarget
            }
        ));
    }

    #[tokio::test]
    async fn corrupt_date_is_invalid_without_crashing() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-13-40", "EU/1/20/1528"))
            .await;
        assert!(matches!(
            state,
            VerificationState::Invalid {
                reason: InvalidReason::MissingEntryDate
            }
        ));
    }

    #[tokio::test]
    async fn unknown_product_policy_invalid() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "XX/0/00/0000"))
            .await;

        let VerificationState::Invalid {
            reason: InvalidReason::UnknownProduct { product_code },
        } = state
        else {
            panic!("expected INVALID unknown_product, got {state}");
        };
        assert_eq!(product_code, "XX/0/00/0000");
    }

    #[tokio::test]
    async fn unknown_product_policy_error() {
        let config = VerifierConfig {
            unknown_product_policy: UnknownProductPolicy::Error,
            ..VerifierConfig::default()
        };
        let verifier = Verifier::new(
            Arc::new(VaccineCatalog::builtin()),
            config,
            StaticTrustValidator::trusted(),
            FixedClock(instant(2021, 8, 1)),
        );
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "XX/0/00/0000"))
            .await;
        assert_eq!(
            state,
            VerificationState::Error {
                code: ErrorCode::CatalogMiss,
                retryable: false,
            }
        );
    }

    #[tokio::test]
    async fn empty_certificate_is_invalid() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));
        let state = verifier.verify_to_completion(&empty_holder()).await;
        assert!(matches!(
            state,
            VerificationState::Invalid {
                reason: InvalidReason::EmptyCertificate
            }
        ));
    }

    #[tokio::test]
    async fn negative_test_verifies_and_positive_is_rejected() {
        let now = NaiveDate::from_ymd_opt(2021, 8, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let verifier = verifier_at(StaticTrustValidator::trusted(), now);
        let state = verifier.verify_to_completion(&test_holder("260415000")).await;
        assert!(matches!(state, VerificationState::Success(_)), "got {state}");

        let state = verifier.verify_to_completion(&test_holder("260373001")).await;
        assert!(matches!(
            state,
            VerificationState::Invalid {
                reason: InvalidReason::NegativeTestRequired
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn trust_timeout_surfaces_as_retryable_error() {
        /// A validator that never answers within any deadline.
        struct StalledValidator;
        impl TrustValidator for StalledValidator {
            fn validate(
                &self,
                _holder: Arc<CertificateHolder>,
            ) -> impl Future<Output = Result<TrustOutcome, TrustError>> + Send {
                async {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(TrustOutcome::Trusted)
                }
            }
        }

        let verifier = verifier_at(StalledValidator, instant(2021, 8, 1));
        let state = verifier
            .verify_to_completion(&vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528"))
            .await;
        assert_eq!(
            state,
            VerificationState::Error {
                code: ErrorCode::TrustFetchTimeout,
                retryable: true,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_attempts_publish_only_the_newest() {
        use std::sync::atomic::AtomicU32;

        /// First call stalls for an hour, later calls answer immediately.
        struct FirstCallStalls {
            calls: AtomicU32,
        }
        impl TrustValidator for FirstCallStalls {
            fn validate(
                &self,
                _holder: Arc<CertificateHolder>,
            ) -> impl Future<Output = Result<TrustOutcome, TrustError>> + Send {
                let first = self.calls.fetch_add(1, Ordering::SeqCst) == 0;
                async move {
                    if first {
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        Ok(TrustOutcome::Untrusted {
                            reason: "stale attempt must never surface".into(),
                        })
                    } else {
                        Ok(TrustOutcome::Trusted)
                    }
                }
            }
        }

        let verifier = verifier_at(
            FirstCallStalls {
                calls: AtomicU32::new(0),
            },
            instant(2021, 8, 1),
        );
        let holder = vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528");

        let first = verifier.start_verification(&holder);
        // Let the first attempt reach its trust call (and stall there)
        // before superseding it.
        tokio::task::yield_now().await;
        let second = verifier.retry_verification(&holder);
        assert!(second > first);

        let state = {
            let mut receiver = verifier.subscribe();
            loop {
                {
                    let snapshot = receiver.borrow_and_update();
                    if snapshot.attempt >= second && snapshot.state.is_terminal() {
                        break snapshot.state.clone();
                    }
                }
                receiver.changed().await.unwrap();
            }
        };

        // Only the second attempt's verdict is ever published.
        assert!(matches!(state, VerificationState::Success(_)), "got {state}");
        let final_snapshot = verifier.subscribe().borrow().clone();
        assert_eq!(final_snapshot.attempt, second);
    }

    #[tokio::test]
    async fn loading_is_published_before_the_verdict() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));
        let holder = vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528");

        let seq = verifier.start_verification(&holder);
        // Immediately after start the published state for this attempt is
        // LOADING (the spawned task has not run yet on this thread).
        let snapshot = verifier.subscribe().borrow().clone();
        assert_eq!(snapshot.attempt, seq);
        assert!(snapshot.state.is_loading() || snapshot.state.is_terminal());

        let state = verifier.verify_to_completion(&holder).await;
        assert!(state.is_terminal());
    }

    #[tokio::test]
    async fn stale_publish_is_dropped_by_the_sequence_guard() {
        let verifier = verifier_at(StaticTrustValidator::trusted(), instant(2021, 8, 1));
        let holder = vaccination_holder(2, 2, "2021-06-01", "EU/1/20/1528");

        let state = verifier.verify_to_completion(&holder).await;
        assert!(state.is_terminal());
        let newest = verifier.subscribe().borrow().attempt;

        // A write tagged with an older attempt must not land.
        verifier.inner.publish(
            newest - 1,
            VerificationState::Invalid {
                reason: InvalidReason::EmptyCertificate,
            },
        );
        assert_eq!(verifier.current_state(), state);
    }
}
