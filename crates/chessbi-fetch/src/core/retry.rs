use std::time::Duration;

use rand::Rng;

/// Maximum relative deviation applied by [`jittered_delay`].
pub const JITTER_FRACTION: f64 = 0.25;

/// Calculate the delay before a retry attempt using exponential backoff.
///
/// The delay formula is: `base * 2^retry_count`
///
/// # Arguments
///
/// * `retry_count` - The current retry number (0-indexed: 0 = first retry)
/// * `base` - The base delay duration
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use chessbi_fetch::core::retry_delay;
///
/// // First retry: base * 2^0 = base
/// assert_eq!(retry_delay(0, Duration::from_millis(100)), Duration::from_millis(100));
///
/// // Second retry: base * 2^1 = base * 2
/// assert_eq!(retry_delay(1, Duration::from_millis(100)), Duration::from_millis(200));
///
/// // Third retry: base * 2^2 = base * 4
/// assert_eq!(retry_delay(2, Duration::from_millis(100)), Duration::from_millis(400));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}

/// Apply symmetric jitter to the exponential delay: `delay * (1 + jitter)`.
///
/// `jitter` is clamped to `[-JITTER_FRACTION, JITTER_FRACTION]`.
///
/// ```
/// use std::time::Duration;
/// use chessbi_fetch::core::jittered_delay;
///
/// let base = Duration::from_secs(1);
/// assert_eq!(jittered_delay(1, base, 0.25), Duration::from_millis(2500));
/// assert_eq!(jittered_delay(1, base, -0.25), Duration::from_millis(1500));
/// ```
pub fn jittered_delay(retry_count: u32, base: Duration, jitter: f64) -> Duration {
    let jitter = jitter.clamp(-JITTER_FRACTION, JITTER_FRACTION);
    let delay = retry_delay(retry_count, base);
    Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter)).unwrap_or(delay)
}

/// Exponential backoff with a uniformly drawn jitter factor.
pub fn backoff_delay(retry_count: u32, base: Duration) -> Duration {
    let jitter = rand::thread_rng().gen_range(-JITTER_FRACTION..=JITTER_FRACTION);
    jittered_delay(retry_count, base, jitter)
}

/// Interpret a `Retry-After` header as a whole number of seconds.
///
/// HTTP-date forms and anything else that is not a non-negative integer
/// yield `None`, so the caller falls back to exponential backoff.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_basic() {
        let base = Duration::from_millis(100);

        assert_eq!(retry_delay(0, base), Duration::from_millis(100));
        assert_eq!(retry_delay(1, base), Duration::from_millis(200));
        assert_eq!(retry_delay(2, base), Duration::from_millis(400));
        assert_eq!(retry_delay(3, base), Duration::from_millis(800));
    }

    #[test]
    fn test_retry_delay_zero_base() {
        let base = Duration::ZERO;

        assert_eq!(retry_delay(0, base), Duration::ZERO);
        assert_eq!(retry_delay(10, base), Duration::ZERO);
    }

    #[test]
    fn test_retry_delay_overflow_protection() {
        let base = Duration::from_secs(u64::MAX / 2);

        let delay = retry_delay(40, base);
        assert!(delay > Duration::ZERO);
    }

    #[test]
    fn test_retry_delay_strictly_increasing() {
        let base = Duration::from_millis(10);
        let delays: Vec<Duration> = (0..8).map(|i| retry_delay(i, base)).collect();

        for pair in delays.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_eq!(pair[1], pair[0] * 2);
        }
    }

    #[test]
    fn test_jittered_delay_bounds() {
        let base = Duration::from_secs(1);

        assert_eq!(jittered_delay(0, base, 0.0), Duration::from_secs(1));
        assert_eq!(jittered_delay(2, base, 0.25), Duration::from_secs(5));
        assert_eq!(jittered_delay(2, base, -0.25), Duration::from_secs(3));
    }

    #[test]
    fn test_jittered_delay_clamps_out_of_range_jitter() {
        let base = Duration::from_secs(1);

        assert_eq!(jittered_delay(0, base, 3.0), Duration::from_millis(1250));
        assert_eq!(jittered_delay(0, base, -3.0), Duration::from_millis(750));
    }

    #[test]
    fn test_backoff_delay_within_quarter_of_nominal() {
        let base = Duration::from_millis(400);

        for retry in 0..6 {
            let nominal = retry_delay(retry, base).as_secs_f64();
            for _ in 0..200 {
                let actual = backoff_delay(retry, base).as_secs_f64();
                assert!(actual >= nominal * 0.75 - 1e-6, "{actual} < 0.75 * {nominal}");
                assert!(actual <= nominal * 1.25 + 1e-6, "{actual} > 1.25 * {nominal}");
            }
        }
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("7"), Some(Duration::from_secs(7)));
        assert_eq!(parse_retry_after(" 0 "), Some(Duration::ZERO));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after("-3"), None);
        assert_eq!(parse_retry_after("1.5"), None);
        assert_eq!(parse_retry_after(""), None);
    }
}
