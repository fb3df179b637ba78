/// Seconds subtracted from the elapsed time before dividing, so the ratio
/// hits 1 a little before the tip catches up with wall-clock time.
/// Empirical value (40 minutes); treat as an opaque tunable.
pub const TIP_ALLOWANCE_SECS: i64 = 40 * 60;

/// Sync progress of a chain that started at `start` and whose tip is now at
/// `tip`, relative to `now`. All values are Unix seconds.
///
/// The result is capped at 1 but has no lower bound. When `now - start` is
/// within the allowance the denominator is zero or negative, so the result
/// may be NaN, negative, or `-inf`. NaN is returned as NaN, never capped.
pub fn calc_progress(start: i64, tip: i64, now: i64) -> f64 {
    let (start, tip, now) = (start as f64, tip as f64, now as f64);
    let current = tip - start;
    let total = now - start - TIP_ALLOWANCE_SECS as f64;
    let ratio = current / total;
    if ratio.is_nan() { ratio } else { ratio.min(1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;

    #[test]
    fn test_halfway() {
        let now = START + TIP_ALLOWANCE_SECS + 1000;
        assert_eq!(calc_progress(START, START + 500, now), 0.5);
    }

    #[test]
    fn test_capped_at_one() {
        let now = START + TIP_ALLOWANCE_SECS + 1000;
        assert_eq!(calc_progress(START, START + 1000, now), 1.0);
        assert_eq!(calc_progress(START, now, now), 1.0);
    }

    #[test]
    fn test_zero_over_zero_is_nan() {
        let now = START + TIP_ALLOWANCE_SECS;
        assert!(calc_progress(START, START, now).is_nan());
    }

    #[test]
    fn test_zero_denominator_positive_numerator_caps() {
        let now = START + TIP_ALLOWANCE_SECS;
        assert_eq!(calc_progress(START, START + 10, now), 1.0);
        assert_eq!(calc_progress(START, START - 10, now), f64::NEG_INFINITY);
    }

    #[test]
    fn test_no_lower_clamp() {
        let now = START + TIP_ALLOWANCE_SECS + 100;
        assert_eq!(calc_progress(START, START - 50, now), -0.5);

        // start inside the allowance window: negative denominator
        let recent = START + 600;
        assert!(calc_progress(START, START + 60, recent) < 0.0);
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        let ratio = calc_progress(i64::MIN, 0, START);
        assert!(ratio.is_finite());
        assert!(ratio > 0.99 && ratio <= 1.0);

        assert_eq!(calc_progress(i64::MIN, i64::MAX, START), 1.0);
        assert!(calc_progress(i64::MAX, i64::MIN, START) > 0.0);
    }
}
