//! # Clock — Injected Wall Time
//!
//! The current instant is supplied by the caller, never read ambiently by
//! evaluation logic, so verification is deterministic under test.
//!
//! Certificate validity is timezone-agnostic calendar time, so the clock
//! yields `NaiveDateTime`; [`SystemClock`] takes the UTC wall clock and
//! drops the offset at this one boundary.

use chrono::{NaiveDateTime, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync + 'static {
    /// The current instant.
    fn now(&self) -> NaiveDateTime;
}

/// The real wall clock (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock frozen at a fixed instant, for tests and point-in-time checks.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
