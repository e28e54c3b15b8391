//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the hcert stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier validation fails loudly with the offending value.
//! - Date parsing inside evaluators does NOT go through these types — it
//!   degrades to `Option` so that evaluation stays total. Only construction
//!   and I/O paths return `HcertError`.

use thiserror::Error;

/// Top-level error type for the hcert stack.
#[derive(Error, Debug)]
pub enum HcertError {
    /// An identifier failed its constructor validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The decoded payload violates a structural expectation.
    #[error("payload error: {0}")]
    Payload(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
