//! # Acceptance Window Scenarios
//!
//! End-to-end window math across the catalog and rules crates: known
//! entries against the builtin catalog and default criteria must land on
//! exactly the documented instants.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use hcert_catalog::{CatalogLookup, VaccineCatalog};
use hcert_core::{RecoveryEntry, TestEntry, VaccinationEntry};
use hcert_rules::{
    AcceptanceCriteria, RecoveryAssessment, TestAssessment, VaccinationAssessment,
};

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn vaccination(dn: u32, sd: u32, dt: &str, mp: &str) -> VaccinationEntry {
    serde_json::from_value(json!({
        "tg": "840539006",
        "vp": "1119349007",
        "mp": mp,
        "ma": "ORG-100030215",
        "dn": dn,
        "sd": sd,
        "dt": dt,
        "co": "CH",
        "is": "Bundesamt für Gesundheit (BAG)",
        "ci": "URN:UVCI:01:CH:2987CC9617DD5593806D4285"
    }))
    .unwrap()
}

#[test]
fn two_dose_regimen_window() {
    let catalog = VaccineCatalog::builtin();
    let criteria = AcceptanceCriteria::default();
    let entry = vaccination(2, 2, "2021-06-01", "EU/1/20/1528");
    let a = VaccinationAssessment::new(&entry);

    let CatalogLookup::Found(vaccine) = catalog.lookup(&entry.product_code) else {
        panic!("Comirnaty must be in the builtin catalog");
    };

    assert!(!a.had_past_infection(vaccine));
    let w = a.validity_window(vaccine, &criteria);
    assert_eq!(w.valid_from, Some(midnight(2021, 6, 1)));
    assert_eq!(w.valid_until, Some(midnight(2021, 11, 28)));
}

#[test]
fn single_dose_regimen_window_has_ramp_up() {
    let catalog = VaccineCatalog::builtin();
    let criteria = AcceptanceCriteria::default();
    let entry = vaccination(1, 1, "2021-06-01", "EU/1/20/1525");
    let a = VaccinationAssessment::new(&entry);

    let vaccine = catalog.lookup(&entry.product_code).found().unwrap();
    assert_eq!(vaccine.total_doses_required, 1);
    assert!(!a.had_past_infection(vaccine));

    let w = a.validity_window(vaccine, &criteria);
    // Validity starts after the ramp-up, but the immunity clock still
    // runs from the injection date.
    assert_eq!(w.valid_from, Some(midnight(2021, 6, 16)));
    assert_eq!(w.valid_until, Some(midnight(2021, 11, 28)));
}

#[test]
fn past_infection_regimen_is_valid_immediately() {
    let catalog = VaccineCatalog::builtin();
    let criteria = AcceptanceCriteria::default();
    // One recorded dose of a two-dose product.
    let entry = vaccination(1, 1, "2021-06-01", "EU/1/20/1528");
    let a = VaccinationAssessment::new(&entry);

    let vaccine = catalog.lookup(&entry.product_code).found().unwrap();
    assert!(a.had_past_infection(vaccine));

    let w = a.validity_window(vaccine, &criteria);
    assert_eq!(w.valid_from, Some(midnight(2021, 6, 1)));
    assert_eq!(w.valid_until, Some(midnight(2021, 11, 28)));
}

#[test]
fn malformed_vaccination_date_yields_absent_bounds() {
    let catalog = VaccineCatalog::builtin();
    let criteria = AcceptanceCriteria::default();
    let entry = vaccination(2, 2, "2021-13-40", "EU/1/20/1528");
    let a = VaccinationAssessment::new(&entry);
    let vaccine = catalog.lookup(&entry.product_code).found().unwrap();

    assert_eq!(a.vaccine_date(), None);
    let w = a.validity_window(vaccine, &criteria);
    assert_eq!(w.valid_from, None);
    assert_eq!(w.valid_until, None);
    assert!(!w.contains(midnight(2021, 8, 1)));
}

#[test]
fn pcr_and_rat_windows() {
    let criteria = AcceptanceCriteria::default();
    let pcr: TestEntry = serde_json::from_value(json!({
        "tg": "840539006",
        "tt": "LP6464-4",
        "sc": "2021-06-01T08:00:00Z",
        "tr": "260415000",
        "co": "CH",
        "is": "Bundesamt für Gesundheit (BAG)",
        "ci": "URN:UVCI:01:CH:F0FDABC092A5D5098B3CB3D3"
    }))
    .unwrap();

    let a = TestAssessment::new(&pcr);
    let w = a.validity_window(&criteria);
    let collected = NaiveDate::from_ymd_opt(2021, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    assert_eq!(w.valid_from, Some(collected));
    assert_eq!(w.valid_until, Some(collected + chrono::Duration::hours(72)));

    let mut rat = pcr.clone();
    rat.test_type = "LP217198-3".into();
    let w = TestAssessment::new(&rat).validity_window(&criteria);
    assert_eq!(w.valid_until, Some(collected + chrono::Duration::hours(48)));
}

#[test]
fn recovery_window() {
    let criteria = AcceptanceCriteria::default();
    let entry: RecoveryEntry = serde_json::from_value(json!({
        "tg": "840539006",
        "fr": "2021-04-10",
        "co": "AT",
        "is": "Ministry of Health",
        "ci": "URN:UVCI:01:AT:10807843F94AEE0EE5093FBC"
    }))
    .unwrap();

    let w = RecoveryAssessment::new(&entry).validity_window(&criteria);
    assert_eq!(w.valid_from, Some(midnight(2021, 4, 20)));
    assert_eq!(w.valid_until, Some(midnight(2021, 10, 6)));
}
