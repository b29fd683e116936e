use std::time::Duration;

/// Exponential backoff policy for failed requests.
///
/// The wait before the first retry is `initial_delay`. Later waits start at
/// `wait_min` and double on each retry, never exceeding `wait_max`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Lower bound of the exponential waits.
    pub wait_min: Duration,
    /// Upper bound of the exponential waits.
    pub wait_max: Duration,
    /// Maximum number of attempts, the first one included.
    pub retry_max: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            wait_min: Duration::from_secs(2),
            wait_max: Duration::from_secs(100),
            retry_max: 4,
        }
    }
}

impl RetryPolicy {
    pub fn new(
        initial_delay: Duration,
        wait_min: Duration,
        wait_max: Duration,
        retry_max: u32,
    ) -> Self {
        Self {
            initial_delay,
            wait_min,
            wait_max,
            retry_max,
        }
    }

    /// Total attempts allowed. A zero `retry_max` still sends one request.
    pub fn max_attempts(&self) -> u32 {
        self.retry_max.max(1)
    }

    /// Wait after the given failed attempt (1-based) before sending the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return self.initial_delay;
        }

        let exp = (attempt - 2).min(31);
        let delay = self.wait_min.saturating_mul(1u32 << exp);
        delay.clamp(self.wait_min, self.wait_max.max(self.wait_min))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::RetryPolicy;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(1),
            Duration::from_millis(2),
            Duration::from_millis(100),
            4,
        )
    }

    #[test]
    fn first_wait_is_initial_delay() {
        assert_eq!(policy().delay_after(1), Duration::from_millis(1));
    }

    #[test]
    fn later_waits_double_from_min_and_cap_at_max() {
        let policy = policy();
        let waits: Vec<_> = (2..=9).map(|attempt| policy.delay_after(attempt)).collect();
        assert_eq!(
            waits,
            [2, 4, 8, 16, 32, 64, 100, 100]
                .into_iter()
                .map(Duration::from_millis)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn huge_attempt_numbers_saturate_at_max() {
        assert_eq!(policy().delay_after(u32::MAX), Duration::from_millis(100));
    }

    #[test]
    fn zero_retry_max_still_allows_one_attempt() {
        let policy = RetryPolicy {
            retry_max: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.max_attempts(), 1);
    }
}
