use std::time::Duration;

use crate::{NovuError, Result, RetryPolicy};

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retry policy. `None` sends every request exactly once.
    pub retry: Option<RetryPolicy>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: None,
        }
    }
}

impl ClientOptions {
    /// Reads the timeout override from `NOVU_REQUESTS_TIMEOUT` (whole seconds).
    ///
    /// Falls back to the default when the variable is unset. Zero and
    /// non-numeric values are rejected.
    pub fn from_env() -> Result<Self> {
        let timeout_ms = match std::env::var("NOVU_REQUESTS_TIMEOUT") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(NovuError::Config(
                        "NOVU_REQUESTS_TIMEOUT must be at least one second".to_owned(),
                    ))
                }
                Ok(secs) => secs.saturating_mul(1_000),
                Err(err) => {
                    return Err(NovuError::Config(format!(
                        "invalid NOVU_REQUESTS_TIMEOUT '{raw}': {err}"
                    )))
                }
            },
            Err(_) => DEFAULT_TIMEOUT_MS,
        };
        Ok(Self {
            timeout_ms,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use crate::{ClientOptions, NovuError, RetryPolicy};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn options_with_timeout_env(value: Option<&str>) -> crate::Result<ClientOptions> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        match value {
            Some(value) => std::env::set_var("NOVU_REQUESTS_TIMEOUT", value),
            None => std::env::remove_var("NOVU_REQUESTS_TIMEOUT"),
        }
        let result = ClientOptions::from_env();
        std::env::remove_var("NOVU_REQUESTS_TIMEOUT");
        result
    }

    #[test]
    fn env_timeout_defaults_when_unset() {
        let options = options_with_timeout_env(None).expect("unset timeout must be accepted");
        assert_eq!(options, ClientOptions::default());
    }

    #[test]
    fn env_timeout_is_read_in_seconds() {
        let options = options_with_timeout_env(Some(" 60 ")).expect("timeout must parse");
        assert_eq!(options.timeout(), Duration::from_secs(60));
        assert!(options.retry.is_none());
    }

    #[test]
    fn env_timeout_rejects_garbage_and_zero() {
        for value in ["soon", "-1", "1.5", "0"] {
            let err = options_with_timeout_env(Some(value)).expect_err("value must be rejected");
            assert!(
                matches!(err, NovuError::Config(_)),
                "unexpected error for {value:?}: {err:?}"
            );
        }
    }

    #[test]
    fn defaults_to_five_seconds_without_retry() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(5));
        assert!(options.retry.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let options = ClientOptions::default()
            .with_timeout(Duration::from_secs(60))
            .with_retry(RetryPolicy::default());
        assert_eq!(options.timeout_ms, 60_000);
        assert_eq!(options.retry, Some(RetryPolicy::default()));
    }
}
