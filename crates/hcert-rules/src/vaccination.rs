//! # Vaccination Entry Evaluation
//!
//! Pure projections over one vaccination entry plus its resolved catalog
//! record. Computes well-formedness, the validity start, and the validity
//! end of the entry under the acceptance criteria.
//!
//! ## Temporal Semantics
//!
//! The vaccination date is a calendar date; all arithmetic is whole-day
//! calendar addition on its start-of-day instant, with no timezone
//! conversion. The immunity clock starts at the *vaccination date*, not at
//! the onset of validity: a single-dose entry whose validity starts 15 days
//! after injection still expires `vaccine_immunity_duration_days` after the
//! injection itself.

use chrono::{Duration, NaiveDateTime};

use hcert_catalog::Vaccine;
use hcert_core::region::RegionNameResolver;
use hcert_core::{temporal, Uvci, VaccinationEntry};

use crate::criteria::AcceptanceCriteria;
use crate::window::ValidityWindow;

/// Pure evaluation surface for one vaccination entry.
#[derive(Debug, Clone, Copy)]
pub struct VaccinationAssessment<'a> {
    entry: &'a VaccinationEntry,
}

impl<'a> VaccinationAssessment<'a> {
    /// Wrap an entry for assessment.
    pub fn new(entry: &'a VaccinationEntry) -> Self {
        Self { entry }
    }

    /// The underlying entry.
    pub fn entry(&self) -> &'a VaccinationEntry {
        self.entry
    }

    /// Dose number in the series.
    pub fn dose_number(&self) -> u32 {
        self.entry.dose_number
    }

    /// Total doses the certificate's series expects.
    pub fn total_doses(&self) -> u32 {
        self.entry.total_doses
    }

    /// Display projection, ` 2/2`.
    pub fn dose_display(&self) -> String {
        format!(" {}/{}", self.dose_number(), self.total_doses())
    }

    /// Whether the regimen implies a prior infection.
    ///
    /// A certificate stating fewer total doses than the product normally
    /// requires implies a prior-infection-adjusted regimen.
    pub fn had_past_infection(&self, vaccine: &Vaccine) -> bool {
        vaccine.total_doses_required > self.total_doses()
    }

    /// Whether the entry targets the recognized disease. Any other code
    /// fails — certificates for diseases the verifier does not recognize
    /// are rejected.
    pub fn is_target_disease_correct(&self, criteria: &AcceptanceCriteria) -> bool {
        self.entry.disease_target == criteria.target_disease
    }

    /// The vaccination date as a start-of-day instant. `None` when the
    /// stored date string does not parse; callers treat that as "cannot
    /// compute validity", never as a crash.
    pub fn vaccine_date(&self) -> Option<NaiveDateTime> {
        temporal::parse_certificate_date_time(&self.entry.vaccination_date)
    }

    /// Start of validity.
    ///
    /// A single-dose regimen with no prior infection becomes valid
    /// `single_dose_validity_offset_days` after the injection; every other
    /// regimen (multi-dose, or already infection-adjusted) is valid from
    /// the vaccination date itself.
    pub fn valid_from(
        &self,
        vaccine: &Vaccine,
        criteria: &AcceptanceCriteria,
    ) -> Option<NaiveDateTime> {
        let vaccine_date = self.vaccine_date()?;
        if !self.had_past_infection(vaccine) && vaccine.total_doses_required == 1 {
            Some(vaccine_date + Duration::days(i64::from(criteria.single_dose_validity_offset_days)))
        } else {
            Some(vaccine_date)
        }
    }

    /// End of validity: a flat immunity window counted from the raw
    /// vaccination date, independent of dose count, prior infection, and
    /// of `valid_from`.
    pub fn valid_until(&self, criteria: &AcceptanceCriteria) -> Option<NaiveDateTime> {
        let vaccine_date = self.vaccine_date()?;
        Some(vaccine_date + Duration::days(i64::from(criteria.vaccine_immunity_duration_days)))
    }

    /// Both validity bounds.
    pub fn validity_window(
        &self,
        vaccine: &Vaccine,
        criteria: &AcceptanceCriteria,
    ) -> ValidityWindow {
        ValidityWindow {
            valid_from: self.valid_from(vaccine, criteria),
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

    /// The country of vaccination, as its raw code.
    pub fn country(&self) -> &str {
        &self.entry.country
    }

    /// The country of vaccination resolved to a display name.
    pub fn country_display_name(&self, resolver: &dyn RegionNameResolver) -> String {
        resolver.display_name_or_code(&self.entry.country)
    }

    /// The vaccination date formatted for display, echoing the raw string
    /// when unparseable.
    pub fn formatted_vaccination_date(&self) -> String {
        temporal::format_display_date(&self.entry.vaccination_date)
    }
}
