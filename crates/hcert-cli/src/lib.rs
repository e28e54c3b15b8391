//! # hcert-cli — Command-Line Interface for the hcert Stack
//!
//! ## Subcommands
//!
//! - `verify` — Run the full verification pipeline on a decoded payload
//!   and print the resulting state as JSON.
//! - `inspect` — Print the computed validity window and rule projections
//!   for every entry in a payload, without a trust check.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no rule evaluation
//!   lives here.

pub mod inspect;
pub mod verify;
