//! # hcert-catalog — Vaccine Product Reference Catalog
//!
//! Static reference data mapping a vaccine medicinal-product code to the
//! metadata the acceptance rules need: how many doses the product's full
//! regimen requires and which disease it targets.
//!
//! ## Design
//!
//! - Lookup is pure and side-effect free, returning an explicit
//!   [`CatalogLookup`] — callers are forced to handle `NotFound` rather than
//!   unwrap a nullable. `NotFound` means "cannot evaluate dose completeness
//!   for this product", which is a *policy* question for the verifier, not
//!   automatically "invalid certificate".
//! - The catalog is loaded once at startup and never mutated. It is
//!   `Send + Sync` and safely shared across concurrent evaluations without
//!   locking.
//! - [`VaccineCatalog::builtin()`] bundles the reference records the stack
//!   ships with; deployments with newer authorization data load a record
//!   list via serde instead.

pub mod catalog;

pub use catalog::{CatalogError, CatalogLookup, Vaccine, VaccineCatalog};

// Re-exported so catalog consumers can name the lookup key without a
// direct hcert-core import.
pub use hcert_core::ProductCode;
