//! # hcert-rules — Acceptance Criteria and Entry Evaluators
//!
//! Pure, deterministic evaluation of certificate entries against
//! jurisdiction acceptance criteria. Given one vaccination, test, or
//! recovery entry plus the reference data it needs, the evaluators here
//! answer: is the entry well-formed for assessment, when does its validity
//! start, and when does it end.
//!
//! ## Evaluation Policy
//!
//! - **Total functions.** Every evaluator terminates with a value for every
//!   input. Unparseable dates degrade to `None`; they are never an error and
//!   never a panic. Classifying the *consequence* of an absent value
//!   (invalid? retryable error?) is the verification layer's job.
//! - **Injected time.** Nothing here reads a clock. The current instant is
//!   a parameter wherever a window is checked.
//! - **No I/O, no suspension points.** Evaluation is synchronous and safe
//!   to run concurrently against the shared read-only catalog.

pub mod criteria;
pub mod recovery;
pub mod test_entry;
pub mod vaccination;
pub mod window;

pub use criteria::AcceptanceCriteria;
pub use recovery::RecoveryAssessment;
pub use test_entry::{TestAssessment, TestKind};
pub use vaccination::VaccinationAssessment;
pub use window::{ValidityWindow, WindowStatus};
