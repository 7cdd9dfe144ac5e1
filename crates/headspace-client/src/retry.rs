//! Bounded exponential-backoff retry for backend requests.
//!
//! Only transient failures are retried: HTTP 502/503 responses and
//! network-level errors that occur before a response is received. Any other
//! response returns to the caller immediately for classification.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::RetryConfig;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// Status codes treated as transient.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 502 | 503)
}

/// User-facing progress reporting for a retried operation.
///
/// The default [`TracingSink`] logs; the CLI installs a colored-terminal
/// implementation.
pub trait StatusSink: Send + Sync {
    /// A retry is about to happen; `attempt` counts retries, 1-indexed.
    fn retrying(&self, attempt: u32, max_retries: u32);
    /// The action succeeded for the given resource.
    fn acknowledged(&self, resource_id: &str);
    /// The action failed terminally with a user-facing message.
    fn failed(&self, message: &str);
}

/// StatusSink that reports through `tracing`.
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn retrying(&self, attempt: u32, max_retries: u32) {
        info!(attempt, max_retries, "retrying request");
    }

    fn acknowledged(&self, resource_id: &str) {
        info!(resource_id, "action acknowledged");
    }

    fn failed(&self, message: &str) {
        warn!(message, "action failed");
    }
}

/// Delay before retry `retry` (1-indexed): `base * 2^(retry - 1)`.
fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let factor = 1u32 << (retry - 1).min(16);
    base.saturating_mul(factor)
}

/// Sends `request`, retrying transient failures up to
/// `config.max_retries` times (so `max_retries + 1` attempts total).
///
/// Returns the last response or transport error once retries are exhausted;
/// a still-retryable result at that point is reported through the sink as a
/// terminal failure and handed back for the caller to classify. Never
/// panics.
pub async fn send_with_retry(
    transport: &dyn HttpTransport,
    request: &ApiRequest,
    config: &RetryConfig,
    sink: &dyn StatusSink,
) -> Result<ApiResponse, TransportError> {
    let mut attempt = 1u32;
    loop {
        let outcome = transport.execute(request).await;
        let retryable = match &outcome {
            Ok(response) => is_retryable_status(response.status),
            Err(_) => true,
        };

        if !retryable {
            return outcome;
        }

        if attempt > config.max_retries {
            sink.failed(&format!(
                "request to {} failed after {attempt} attempts",
                request.path
            ));
            return outcome;
        }

        let delay = backoff_delay(config.base_delay(), attempt);
        sink.retrying(attempt, config.max_retries);
        warn!(
            path = %request.path,
            attempt,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            "transient failure, backing off"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
