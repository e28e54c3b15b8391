//! # HTTP Trust Client
//!
//! A [`TrustValidator`] backed by a trust-list service over HTTP. The
//! service owns the cryptographic work (signature check against the active
//! key list, revocation lookup); this client submits the certificate
//! identifier and maps the response onto [`TrustOutcome`] / [`TrustError`].
//!
//! ## Configuration
//!
//! All knobs live in [`TrustClientConfig`], passed at construction. There
//! is no process-wide configuration state — two validators with different
//! endpoints or user agents coexist in one process.
//!
//! ## Error Mapping
//!
//! - Transport failure after retries → retryable [`TrustError`].
//! - HTTP 5xx → retryable [`TrustError`].
//! - HTTP 4xx or a malformed response body → non-retryable [`TrustError`].
//! - 2xx with `trusted: false` → [`TrustOutcome::Untrusted`] (a verdict,
//!   not an error).

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use hcert_core::CertificateHolder;

use crate::retry::retry_send;
use crate::trust::{TrustError, TrustOutcome, TrustValidator};

/// Configuration for the HTTP trust client.
#[derive(Debug, Clone)]
pub struct TrustClientConfig {
    /// Base URL of the trust service (e.g. `https://trust.example.org`).
    pub base_url: String,
    /// Value sent as the `User-Agent` header.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Transport-error retries after the initial request.
    pub max_retries: u32,
}

impl TrustClientConfig {
    /// Configuration with default user agent, timeout, and retry policy.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: format!("hcert-verifier/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 10,
            max_retries: 2,
        }
    }
}

/// Errors constructing the HTTP trust client.
#[derive(Error, Debug)]
pub enum TrustClientError {
    /// The configuration is unusable.
    #[error("invalid trust client configuration: {0}")]
    Configuration(String),
}

/// Shape of the trust service's verdict response.
#[derive(Debug, serde::Deserialize)]
struct TrustStatusResponse {
    trusted: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// A [`TrustValidator`] that queries a trust-list service over HTTP.
#[derive(Debug)]
pub struct HttpTrustValidator {
    client: reqwest::Client,
    endpoint: Url,
    max_retries: u32,
}

impl HttpTrustValidator {
    /// Build a validator from configuration.
    pub fn new(config: TrustClientConfig) -> Result<Self, TrustClientError> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| TrustClientError::Configuration(format!("invalid base URL: {e}")))?;
        let endpoint = base
            .join("/v1/trust/validate")
            .map_err(|e| TrustClientError::Configuration(format!("invalid base URL: {e}")))?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|_| {
                TrustClientError::Configuration("invalid user agent characters".into())
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                TrustClientError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            max_retries: config.max_retries,
        })
    }
}

impl TrustValidator for HttpTrustValidator {
    async fn validate(
        &self,
        holder: Arc<CertificateHolder>,
    ) -> Result<TrustOutcome, TrustError> {
        let Some(uvci) = holder.payload().primary_entry_identifier() else {
            return Err(TrustError {
                detail: "certificate carries no entry to validate".into(),
                retryable: false,
            });
        };

        let body = serde_json::json!({ "ci": uvci.as_str() });
        let response = retry_send(self.max_retries, || {
            self.client.post(self.endpoint.clone()).json(&body).send()
        })
        .await
        .map_err(|e| TrustError {
            detail: format!("trust service unreachable: {e}"),
            retryable: true,
        })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(TrustError {
                detail: format!("trust service error: HTTP {status}"),
                retryable: true,
            });
        }
        if !status.is_success() {
            return Err(TrustError {
                detail: format!("trust service rejected request: HTTP {status}"),
                retryable: false,
            });
        }

        let verdict: TrustStatusResponse = response.json().await.map_err(|e| TrustError {
            detail: format!("malformed trust response: {e}"),
            retryable: false,
        })?;

        if verdict.trusted {
            Ok(TrustOutcome::Trusted)
        } else {
            tracing::debug!(uvci = %uvci, "trust service reported certificate untrusted");
            Ok(TrustOutcome::Untrusted {
                reason: verdict
                    .reason
                    .unwrap_or_else(|| "not on the trust list".into()),
            })
        }
    }
}
