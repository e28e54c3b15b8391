//! Retry with exponential backoff for trust-service HTTP calls.
//!
//! Only transient transport errors (connection failures, timeouts) are
//! retried. Status-code handling stays with the caller: a 4xx or 5xx is a
//! *response*, not a transport failure.

use std::time::Duration;

/// Base delay between retries; doubles each attempt.
const BASE_DELAY_MS: u64 = 200;

/// Call `f` until it yields a response, retrying up to `max_retries` times
/// on transport errors with exponential backoff (200ms, 400ms, 800ms, ...).
pub(crate) async fn retry_send<F, Fut>(
    max_retries: u32,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < max_retries => {
                let delay = Duration::from_millis(BASE_DELAY_MS << attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    "trust service request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
