//! Inspect subcommand — per-entry rule projections without a trust check.

use std::path::PathBuf;

use hcert_catalog::CatalogLookup;
use hcert_core::StaticRegionNames;
use hcert_rules::{
    AcceptanceCriteria, RecoveryAssessment, TestAssessment, VaccinationAssessment,
};

/// Arguments for `hcert inspect`.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Path to a decoded certificate payload (JSON).
    pub payload: PathBuf,

    /// Path to a vaccine catalog record list (JSON array) replacing the
    /// builtin catalog.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Run `hcert inspect`: print one JSON report line per entry.
pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let holder = crate::verify::load_holder(&args.payload)?;
    let catalog = crate::verify::load_catalog(args.catalog.as_deref())?;
    let criteria = AcceptanceCriteria::default();
    let regions = StaticRegionNames;

    let payload = holder.payload();
    let mut report = Vec::new();

    for entry in &payload.vaccinations {
        let a = VaccinationAssessment::new(entry);
        let lookup = catalog.lookup(&entry.product_code);
        let window = match lookup {
            CatalogLookup::Found(vaccine) => {
                serde_json::to_value(a.validity_window(vaccine, &criteria))?
            }
            CatalogLookup::NotFound => serde_json::Value::Null,
        };
        report.push(serde_json::json!({
            "kind": "vaccination",
            "certificate_identifier": a.certificate_identifier().as_str(),
            "product": entry.product_code.as_str(),
            "product_known": lookup.found().is_some(),
            "doses": a.dose_display().trim_start(),
            "past_infection": lookup.found().map(|v| a.had_past_infection(v)),
            "vaccination_date": a.formatted_vaccination_date(),
            "country": a.country_display_name(&regions),
            "issuer": a.issuer(),
            "target_disease_recognized": a.is_target_disease_correct(&criteria),
            "window": window,
        }));
    }

    for entry in &payload.tests {
        let a = TestAssessment::new(entry);
        report.push(serde_json::json!({
            "kind": "test",
            "certificate_identifier": a.certificate_identifier().as_str(),
            "test_type": entry.test_type,
            "negative": a.is_negative(),
            "country": a.country_display_name(&regions),
            "issuer": a.issuer(),
            "target_disease_recognized": a.is_target_disease_correct(&criteria),
            "window": a.validity_window(&criteria),
        }));
    }

    for entry in &payload.recoveries {
        let a = RecoveryAssessment::new(entry);
        report.push(serde_json::json!({
            "kind": "recovery",
            "certificate_identifier": a.certificate_identifier().as_str(),
            "first_positive_result": a.formatted_first_positive_result(),
            "country": a.country_display_name(&regions),
            "issuer": a.issuer(),
            "target_disease_recognized": a.is_target_disease_correct(&criteria),
            "window": a.validity_window(&criteria),
        }));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
