/*
[INPUT]:  Server time from GET /auth/time and the local clock
[OUTPUT]: Cached clock delta and signing timestamps
[POS]:    HTTP layer - time synchronization for request signatures
[UPDATE]: When changing how the delta is computed or refreshed
*/

use std::future::Future;

use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::http::{OvhClient, OvhError, Result};

const TIME_PATH: &str = "/auth/time";

/// Server-minus-local clock offset in seconds.
///
/// Computed at most once per client; a failed computation leaves it empty so
/// the next authenticated call tries again. Concurrent first callers share a
/// single in-flight computation.
#[derive(Debug, Default)]
pub struct ClockDelta {
    cell: OnceCell<f64>,
}

impl ClockDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached delta, if already computed
    pub fn get(&self) -> Option<f64> {
        self.cell.get().copied()
    }

    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<f64>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<f64>>,
    {
        self.cell.get_or_try_init(init).await.copied()
    }
}

/// Local Unix time in fractional seconds
pub fn now_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Timestamp sent in X-Ovh-Timestamp and signed
pub fn signing_timestamp(now: f64, delta: f64) -> i64 {
    (now + delta).floor() as i64
}

impl OvhClient {
    /// Clock delta, fetched from the server on first use
    pub async fn clock_delta(&self) -> Result<f64> {
        self.delta
            .get_or_try_init(|| self.calculate_delta_time())
            .await
    }

    /// Clock delta without triggering a computation
    pub fn cached_clock_delta(&self) -> Option<f64> {
        self.delta.get()
    }

    /// GET /auth/time (unauthenticated, plain-text Unix seconds)
    async fn calculate_delta_time(&self) -> Result<f64> {
        debug!("calculating delta time");

        let url = format!("{}{}", self.base_url(), TIME_PATH);
        let response = self.http_client.get(&url).send().await.inspect_err(|err| {
            warn!(error = %err, "error while calculating delta time");
        })?;
        let text = response.text().await?;

        let server_time = parse_server_time(&text).inspect_err(|err| {
            warn!(error = %err, "error while calculating delta time");
        })?;
        let delta = server_time - now_seconds();

        info!(delta, "calculate delta time done");
        Ok(delta)
    }
}

fn parse_server_time(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(OvhError::InvalidResponse(format!(
            "{TIME_PATH} returned a non-numeric body: '{trimmed}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_timestamp_floors() {
        assert_eq!(signing_timestamp(1_000.9, 0.0), 1_000);
        assert_eq!(signing_timestamp(1_000.5, 2.6), 1_003);
        assert_eq!(signing_timestamp(1_000.2, -0.5), 999);
    }

    #[test]
    fn test_parse_server_time() {
        assert_eq!(parse_server_time("1457018875\n").unwrap(), 1_457_018_875.0);
        assert!(matches!(
            parse_server_time("<html>oops</html>"),
            Err(OvhError::InvalidResponse(_))
        ));
        assert!(matches!(parse_server_time("NaN"), Err(OvhError::InvalidResponse(_))));
        assert!(matches!(parse_server_time(""), Err(OvhError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_clock_delta_failure_is_not_cached() {
        let delta = ClockDelta::new();
        let failed = delta
            .get_or_try_init(|| async { Err(OvhError::InvalidResponse("boom".into())) })
            .await;
        assert!(failed.is_err());
        assert_eq!(delta.get(), None);

        let value = delta.get_or_try_init(|| async { Ok(12.5) }).await.unwrap();
        assert_eq!(value, 12.5);
        let again = delta.get_or_try_init(|| async { Ok(99.0) }).await.unwrap();
        assert_eq!(again, 12.5);
    }
}
