//! # Temporal Parsing — Fail-Soft Certificate Dates
//!
//! Certificate date fields arrive as raw strings from the external decoder
//! and are parsed here with a fail-soft policy: any unparseable input yields
//! `None`, never a panic and never an `Err` that aborts evaluation.
//!
//! ## Invariant
//!
//! Certificate dates are calendar dates with no time component and no
//! timezone. All downstream arithmetic ("plus N days") is ordinary calendar
//! addition on the start-of-day instant, with standard month/year rollover
//! and no timezone conversion. Sample-collection instants, the one field
//! that does carry a time, are normalized to UTC before the offset is
//! dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Display format for certificate dates, `31.12.2021`.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse an ISO-8601 calendar date string (`2021-06-01`).
///
/// Returns `None` on any parse failure — an out-of-range month, a stray
/// time component, an empty string. Callers treat `None` as "cannot compute
/// validity", not as a hard error.
pub fn parse_certificate_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse an ISO-8601 calendar date string to its start-of-day instant.
pub fn parse_certificate_date_time(raw: &str) -> Option<NaiveDateTime> {
    parse_certificate_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a sample-collection instant.
///
/// Accepts RFC 3339 with any offset (normalized to UTC) and, leniently, an
/// offset-less `YYYY-MM-DDTHH:MM:SS` form that some issuers emit. Fail-soft:
/// `None` on anything else.
pub fn parse_sample_collection(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Format a raw certificate date string for display (`01.06.2021`).
///
/// Echoes the raw input back unchanged when it does not parse — a corrupt
/// date field is still shown to the user rather than hidden.
pub fn format_display_date(raw: &str) -> String {
    match parse_certificate_date(raw) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
