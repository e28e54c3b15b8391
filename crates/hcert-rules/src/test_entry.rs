//! # Test Entry Evaluation
//!
//! Pure projections over one test entry. A test is only acceptable while
//! its result is fresh: the validity window opens at sample collection and
//! closes a test-type-specific number of hours later.

use chrono::{Duration, NaiveDateTime};

use hcert_core::region::RegionNameResolver;
use hcert_core::{temporal, TestEntry, Uvci};

use crate::criteria::{self, AcceptanceCriteria};
use crate::window::ValidityWindow;

/// The recognized families of test, keyed by their type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    /// Nucleic-acid amplification test (PCR).
    Pcr,
    /// Rapid antigen test.
    Rat,
}

/// Pure evaluation surface for one test entry.
#[derive(Debug, Clone, Copy)]
pub struct TestAssessment<'a> {
    entry: &'a TestEntry,
}

impl<'a> TestAssessment<'a> {
    /// Wrap an entry for assessment.
    pub fn new(entry: &'a TestEntry) -> Self {
        Self { entry }
    }

    /// The underlying entry.
    pub fn entry(&self) -> &'a TestEntry {
        self.entry
    }

    /// Whether the entry targets the recognized disease.
    pub fn is_target_disease_correct(&self, criteria: &AcceptanceCriteria) -> bool {
        self.entry.disease_target == criteria.target_disease
    }

    /// Whether the result code is "not detected". Anything else — detected,
    /// indeterminate, or an unknown code — is not a negative result.
    pub fn is_negative(&self) -> bool {
        self.entry.result == criteria::TEST_RESULT_NOT_DETECTED
    }

    /// The recognized test kind, or `None` for an unknown type code.
    pub fn test_kind(&self) -> Option<TestKind> {
        match self.entry.test_type.as_str() {
            criteria::TEST_TYPE_PCR => Some(TestKind::Pcr),
            criteria::TEST_TYPE_RAT => Some(TestKind::Rat),
            _ => None,
        }
    }

    /// The sample-collection instant. Fail-soft: `None` when the stored
    /// string does not parse.
    pub fn sample_collection_date(&self) -> Option<NaiveDateTime> {
        temporal::parse_sample_collection(&self.entry.sample_collection)
    }

    /// The validity window: `[collection, collection + validity hours]`.
    ///
    /// Indeterminate when the collection instant does not parse or the
    /// test type code is unrecognized — an unknown test type must not get
    /// a window by accident.
    pub fn validity_window(&self, criteria: &AcceptanceCriteria) -> ValidityWindow {
        let (Some(collected), Some(kind)) = (self.sample_collection_date(), self.test_kind())
        else {
            return ValidityWindow::indeterminate();
        };
        let hours = match kind {
            TestKind::Pcr => criteria.pcr_test_validity_hours,
            TestKind::Rat => criteria.rat_test_validity_hours,
        };
        ValidityWindow {
            valid_from: Some(collected),
            valid_until: Some(collected + Duration::hours(i64::from(hours))),
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

    /// The country of the test, as its raw code.
    pub fn country(&self) -> &str {
        &self.entry.country
    }

    /// The country of the test resolved to a display name.
    pub fn country_display_name(&self, resolver: &dyn RegionNameResolver) -> String {
        resolver.display_name_or_code(&self.entry.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn entry(tt: &str, sc: &str, tr: &str) -> TestEntry {
        serde_json::from_value(json!({
            "tg": "840539006",
            "tt": tt,
            "sc": sc,
            "tr": tr,
            "co": "CH",
            "is": "Bundesamt für Gesundheit (BAG)",
            "ci": "URN:UVCI:01:CH:F0FDABC092A5D5098B3CB3D3"
        }))
        .unwrap()
    }

    fn instant(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn pcr_window_is_72_hours() {
        let e = entry("LP6464-4", "2021-06-01T10:30:00Z", "260415000");
        let a = TestAssessment::new(&e);
        let w = a.validity_window(&AcceptanceCriteria::default());

        assert_eq!(a.test_kind(), Some(TestKind::Pcr));
        assert_eq!(w.valid_from, Some(instant(2021, 6, 1, 10)));
        assert_eq!(w.valid_until, Some(instant(2021, 6, 4, 10)));
        // Inclusive at the closing boundary.
        assert!(w.contains(instant(2021, 6, 4, 10)));
    }

    #[test]
    fn rat_window_is_48_hours() {
        let e = entry("LP217198-3", "2021-06-01T10:30:00Z", "260415000");
        let a = TestAssessment::new(&e);
        let w = a.validity_window(&AcceptanceCriteria::default());

        assert_eq!(a.test_kind(), Some(TestKind::Rat));
        assert_eq!(w.valid_until, Some(instant(2021, 6, 3, 10)));
    }

    #[test]
    fn unknown_test_type_gets_no_window() {
        let e = entry("LP0000-0", "2021-06-01T10:30:00Z", "260415000");
        let a = TestAssessment::new(&e);
        assert_eq!(a.test_kind(), None);
        assert!(!a.validity_window(&AcceptanceCriteria::default()).is_complete());
    }

    #[test]
    fn unparseable_collection_instant_gets_no_window() {
        let e = entry("LP6464-4", "yesterday-ish", "260415000");
        let a = TestAssessment::new(&e);
        assert_eq!(a.sample_collection_date(), None);
        assert!(!a.validity_window(&AcceptanceCriteria::default()).is_complete());
    }

    #[test]
    fn only_not_detected_counts_as_negative() {
        assert!(TestAssessment::new(&entry("LP6464-4", "2021-06-01T10:30:00Z", "260415000"))
            .is_negative());
        // 260373001 = detected.
        assert!(!TestAssessment::new(&entry("LP6464-4", "2021-06-01T10:30:00Z", "260373001"))
            .is_negative());
        assert!(!TestAssessment::new(&entry("LP6464-4", "2021-06-01T10:30:00Z", "")).is_negative());
    }

    #[test]
    fn offset_in_collection_instant_is_normalized() {
        let utc = entry("LP6464-4", "2021-06-01T12:30:00Z", "260415000");
        let offset = entry("LP6464-4", "2021-06-01T14:30:00+02:00", "260415000");
        assert_eq!(
            TestAssessment::new(&utc).sample_collection_date(),
            TestAssessment::new(&offset).sample_collection_date()
        );
    }

    #[test]
    fn disease_target_check() {
        let c = AcceptanceCriteria::default();
        let e = entry("LP6464-4", "2021-06-01T10:30:00Z", "260415000");
        assert!(TestAssessment::new(&e).is_target_disease_correct(&c));

        let mut other = e.clone();
        other.disease_target = "6142004".into();
        assert!(!TestAssessment::new(&other).is_target_disease_correct(&c));
    }
}
