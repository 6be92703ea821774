//! Transient-failure classification and bounded retry with exponential
//! backoff + jitter, shared by the text and image clients.

use crate::error::ApiError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Error-text markers that classify an upstream failure as likely
/// temporary. Status-code tokens come first because the clients embed the
/// structured HTTP status into the message; the free-text markers are the
/// fallback for SDK-style error strings.
const TRANSIENT_MARKERS: [&str; 17] = [
    "503",
    "502",
    "429",
    "overloaded",
    "service unavailable",
    "internal error",
    "backend error",
    "rate",
    "quota",
    "resource exhausted",
    "resource has been exhausted",
    "timeout",
    "timed out",
    "network",
    "econnreset",
    "connection reset",
    "etimedout",
];

/// True when the error text looks like overload, rate limiting, or a
/// network blip. Known limitation: substring matching is fragile against
/// upstream message-format changes; the clients mitigate it by putting the
/// numeric status first in the message.
pub fn is_transient(detail: &str) -> bool {
    let lowered = detail.to_ascii_lowercase();
    TRANSIENT_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Attempt budget and delay bounds for one client.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = retries + 1).
    pub retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_ms: u64,
}

impl RetryPolicy {
    pub const fn new(retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            retries,
            base_delay_ms,
            max_delay_ms,
            jitter_ms: 250,
        }
    }

    /// `base * 2^attempt`, capped, plus bounded random jitter.
    fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let exp = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(16))
            .min(self.max_delay_ms);
        exp + rand::thread_rng().gen_range(0..=self.jitter_ms)
    }
}

/// Run `op` with up to `policy.retries` retries, sleeping between attempts.
/// Only transient provider failures are retried; everything else
/// propagates immediately.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, label: &str, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.retries || !error_is_transient(&err) {
                    return Err(err);
                }
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    label,
                    attempt = attempt + 1,
                    max_attempts = policy.retries + 1,
                    delay_ms = delay,
                    error = %err,
                    "transient upstream failure; backing off"
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
                attempt += 1;
            }
        }
    }
}

fn error_is_transient(err: &ApiError) -> bool {
    matches!(err, ApiError::ProviderRequestFailed(_)) && is_transient(&err.to_string())
}
