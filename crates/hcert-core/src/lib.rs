//! # hcert-core — Foundational Types for the hcert Stack
//!
//! This crate is the bedrock of the hcert stack. It defines the decoded
//! health-certificate payload model and the type-system primitives shared by
//! every other crate in the workspace; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Uvci` and `ProductCode`
//!    are newtypes with validated constructors. No bare strings for
//!    identifiers at API seams.
//!
//! 2. **Fail-soft temporal parsing.** Certificate date fields arrive as raw
//!    strings from an external decoder. Parsing them yields `Option`, never
//!    a panic and never an error that aborts evaluation — a corrupt single
//!    field must not take down evaluation of an otherwise-displayable
//!    certificate.
//!
//! 3. **Immutable payloads.** A [`CertificatePayload`] is constructed once by
//!    the external decode/parse collaborator and only ever read afterwards.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hcert-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross the payload boundary.

pub mod error;
pub mod holder;
pub mod identity;
pub mod payload;
pub mod region;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::HcertError;
pub use holder::CertificateHolder;
pub use identity::{PersonName, ProductCode, Uvci};
pub use payload::{CertificatePayload, RecoveryEntry, TestEntry, VaccinationEntry};
pub use region::{RegionNameResolver, StaticRegionNames};
