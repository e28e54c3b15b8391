//! Verify subcommand — run the full pipeline on one decoded payload.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDateTime, Utc};

use hcert_catalog::VaccineCatalog;
use hcert_core::{temporal, CertificateHolder, CertificatePayload};
use hcert_verifier::{
    FixedClock, HttpTrustValidator, StaticTrustValidator, TrustClientConfig, TrustValidator,
    VerificationState, Verifier, VerifierConfig,
};

/// Arguments for `hcert verify`.
#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// Path to a decoded certificate payload (JSON).
    pub payload: PathBuf,

    /// Base URL of the trust service. Without it the trust check runs
    /// offline with the verdict from `--offline`.
    #[arg(long)]
    pub trust_url: Option<String>,

    /// Offline trust verdict to assume when no trust service is given.
    #[arg(long, value_enum, default_value_t = OfflineTrust::Trusted)]
    pub offline: OfflineTrust,

    /// Evaluate as of this instant (RFC 3339 or `YYYY-MM-DDTHH:MM:SS`)
    /// instead of now.
    #[arg(long)]
    pub at: Option<String>,

    /// Path to a vaccine catalog record list (JSON array) replacing the
    /// builtin catalog.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Trust verdict assumed in offline mode.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum OfflineTrust {
    /// Assume the signature/trust check passed.
    Trusted,
    /// Assume the signature/trust check failed.
    Untrusted,
}

/// Run `hcert verify`. Returns whether verification ended in SUCCESS.
pub async fn run(args: VerifyArgs) -> anyhow::Result<bool> {
    let holder = load_holder(&args.payload)?;
    let catalog = Arc::new(load_catalog(args.catalog.as_deref())?);
    let now = resolve_instant(args.at.as_deref())?;
    tracing::debug!(
        payload = %args.payload.display(),
        products = catalog.len(),
        %now,
        "starting verification"
    );
    let config = VerifierConfig::default();

    let state = match &args.trust_url {
        Some(url) => {
            let trust = HttpTrustValidator::new(TrustClientConfig::new(url.clone()))
                .context("building trust client")?;
            verify(catalog, config, trust, now, &holder).await
        }
        None => {
            let trust = match args.offline {
                OfflineTrust::Trusted => StaticTrustValidator::trusted(),
                OfflineTrust::Untrusted => StaticTrustValidator::untrusted("offline override"),
            };
            verify(catalog, config, trust, now, &holder).await
        }
    };

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(matches!(state, VerificationState::Success(_)))
}

async fn verify<T: TrustValidator>(
    catalog: Arc<VaccineCatalog>,
    config: VerifierConfig,
    trust: T,
    now: NaiveDateTime,
    holder: &CertificateHolder,
) -> VerificationState {
    Verifier::new(catalog, config, trust, FixedClock(now))
        .verify_to_completion(holder)
        .await
}

pub(crate) fn load_holder(path: &std::path::Path) -> anyhow::Result<CertificateHolder> {
    let raw = std::fs::read(path)
        .with_context(|| format!("reading payload {}", path.display()))?;
    let payload: CertificatePayload =
        serde_json::from_slice(&raw).context("parsing decoded payload JSON")?;
    Ok(CertificateHolder::new(payload))
}

pub(crate) fn load_catalog(path: Option<&std::path::Path>) -> anyhow::Result<VaccineCatalog> {
    match path {
        Some(path) => {
            let raw = std::fs::read(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            VaccineCatalog::from_json_slice(&raw).context("parsing catalog record list")
        }
        None => Ok(VaccineCatalog::builtin()),
    }
}

fn resolve_instant(at: Option<&str>) -> anyhow::Result<NaiveDateTime> {
    match at {
        None => Ok(Utc::now().naive_utc()),
        Some(raw) => temporal::parse_sample_collection(raw)
            .or_else(|| temporal::parse_certificate_date_time(raw))
            .with_context(|| format!("unparseable --at instant: {raw}")),
    }
}
