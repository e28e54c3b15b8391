//! # Validity Window
//!
//! The derived `[valid_from, valid_until]` range during which an entry is
//! considered protective. Never persisted — recomputed from the entry on
//! every evaluation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A derived validity range. Either bound is absent when the entry's date
/// field did not parse.
///
/// Invariant: `valid_from <= valid_until` whenever both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// Start of validity, inclusive.
    pub valid_from: Option<NaiveDateTime>,
    /// End of validity, inclusive.
    pub valid_until: Option<NaiveDateTime>,
}

/// Where an instant falls relative to a [`ValidityWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStatus {
    /// The instant is before `valid_from`.
    NotYetValid,
    /// The instant is inside the window (boundaries included).
    Valid,
    /// The instant is after `valid_until`.
    Expired,
    /// One or both bounds are absent; the window cannot be assessed.
    Indeterminate,
}

impl ValidityWindow {
    /// A window with both bounds absent.
    pub fn indeterminate() -> Self {
        Self {
            valid_from: None,
            valid_until: None,
        }
    }

    /// Whether both bounds are present.
    pub fn is_complete(&self) -> bool {
        self.valid_from.is_some() && self.valid_until.is_some()
    }

    /// Classify `now` against this window.
    ///
    /// Both boundaries are inclusive: an entry is valid at exactly
    /// `valid_from` and at exactly `valid_until`.
    pub fn status_at(&self, now: NaiveDateTime) -> WindowStatus {
        let (Some(from), Some(until)) = (self.valid_from, self.valid_until) else {
            return WindowStatus::Indeterminate;
        };
        if now < from {
            WindowStatus::NotYetValid
        } else if now > until {
            WindowStatus::Expired
        } else {
            WindowStatus::Valid
        }
    }

    /// Whether `now` falls inside the window (boundaries included).
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.status_at(now) == WindowStatus::Valid
    }
}
