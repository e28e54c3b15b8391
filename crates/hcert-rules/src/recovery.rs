//! # Recovery Entry Evaluation
//!
//! Pure projections over one recovery entry. Recovery confers protection
//! only after an initial post-infection interval, and for a bounded period:
//! the window opens `recovery_offset_valid_from_days` after the first
//! positive result and closes `recovery_validity_duration_days` after it.
//! The issuer-claimed `df`/`du` fields are display-only and never consulted.

use chrono::{Duration, NaiveDateTime};

use hcert_core::region::RegionNameResolver;
use hcert_core::{temporal, RecoveryEntry, Uvci};

use crate::criteria::AcceptanceCriteria;
use crate::window::ValidityWindow;

/// Pure evaluation surface for one recovery entry.
#[derive(Debug, Clone, Copy)]
pub struct RecoveryAssessment<'a> {
    entry: &'a RecoveryEntry,
}

impl<'a> RecoveryAssessment<'a> {
    /// Wrap an entry for assessment.
    pub fn new(entry: &'a RecoveryEntry) -> Self {
        Self { entry }
    }

    /// The underlying entry.
    pub fn entry(&self) -> &'a RecoveryEntry {
        self.entry
    }

    /// Whether the entry targets the recognized disease.
    pub fn is_target_disease_correct(&self, criteria: &AcceptanceCriteria) -> bool {
        self.entry.disease_target == criteria.target_disease
    }

    /// The first positive result as a start-of-day instant. Fail-soft.
    pub fn first_positive_result(&self) -> Option<NaiveDateTime> {
        temporal::parse_certificate_date_time(&self.entry.first_positive_result)
    }

    /// Start of validity: first positive result plus the post-infection
    /// interval.
    pub fn valid_from(&self, criteria: &AcceptanceCriteria) -> Option<NaiveDateTime> {
        let first = self.first_positive_result()?;
        Some(first + Duration::days(i64::from(criteria.recovery_offset_valid_from_days)))
    }

    /// End of validity: first positive result plus the recovery validity
    /// duration.
    pub fn valid_until(&self, criteria: &AcceptanceCriteria) -> Option<NaiveDateTime> {
        let first = self.first_positive_result()?;
        Some(first + Duration::days(i64::from(criteria.recovery_validity_duration_days)))
    }

    /// Both validity bounds.
    pub fn validity_window(&self, criteria: &AcceptanceCriteria) -> ValidityWindow {
        ValidityWindow {
            valid_from: self.valid_from(criteria),
            valid_until: self.valid_until(criteria),
        }
    }

    /// The unique certificate identifier.
    pub fn certificate_identifier(&self) -> &Uvci {
        &self.entry.certificate_identifier
    }

    /// The certificate issuer.
    pub fn issuer(&self) -> &str {
        &self.entry.issuer
    }

    /// The country of the first positive test, as its raw code.
    pub fn country(&self) -> &str {
        &self.entry.country
    }

    /// The country resolved to a display name.
    pub fn country_display_name(&self, resolver: &dyn RegionNameResolver) -> String {
        resolver.display_name_or_code(&self.entry.country)
    }

    /// The first positive result formatted for display, echoing the raw
    /// string when unparseable.
    pub fn formatted_first_positive_result(&self) -> String {
        temporal::format_display_date(&self.entry.first_positive_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn entry(fr: &str) -> RecoveryEntry {
        serde_json::from_value(json!({
            "tg": "840539006",
            "fr": fr,
            "co": "AT",
            "is": "Ministry of Health",
            "ci": "URN:UVCI:01:AT:10807843F94AEE0EE5093FBC"
        }))
        .unwrap()
    }

    fn instant(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn window_opens_after_post_infection_interval() {
        let e = entry("2021-04-10");
        let a = RecoveryAssessment::new(&e);
        let c = AcceptanceCriteria::default();

        assert_eq!(a.valid_from(&c), Some(instant(2021, 4, 20)));
        assert_eq!(a.valid_until(&c), Some(instant(2021, 10, 6)));

        let w = a.validity_window(&c);
        assert!(w.contains(instant(2021, 4, 20)));
        assert!(!w.contains(instant(2021, 4, 19)));
        assert!(w.contains(instant(2021, 10, 6)));
        assert!(!w.contains(instant(2021, 10, 7)));
    }

    #[test]
    fn malformed_first_positive_degrades_to_absent() {
        let e = entry("10.04.2021");
        let a = RecoveryAssessment::new(&e);
        let c = AcceptanceCriteria::default();

        assert_eq!(a.first_positive_result(), None);
        assert!(!a.validity_window(&c).is_complete());
        assert_eq!(a.formatted_first_positive_result(), "10.04.2021");
    }

    #[test]
    fn disease_target_check() {
        let c = AcceptanceCriteria::default();
        assert!(RecoveryAssessment::new(&entry("2021-04-10")).is_target_disease_correct(&c));

        let mut other = entry("2021-04-10");
        other.disease_target = "6142004".into();
        assert!(!RecoveryAssessment::new(&other).is_target_disease_correct(&c));
    }

    #[test]
    fn projections() {
        let e = entry("2021-04-10");
        let a = RecoveryAssessment::new(&e);
        assert_eq!(a.country(), "AT");
        assert_eq!(a.issuer(), "Ministry of Health");
        assert_eq!(a.formatted_first_positive_result(), "10.04.2021");
    }
}
