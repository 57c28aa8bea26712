//! Time-driven selection of the current catalog entry.
//!
//! Every caller that sees the same clock computes the same index for the same
//! window, so no shared counter or lock is needed to keep clients in step.

use std::num::{NonZeroU64, NonZeroUsize};

/// Seconds each entry stays current unless configured otherwise.
pub const DEFAULT_PERIOD_SECS: u64 = 5;

/// `floor(now / period) mod size`, using Euclidean division so instants
/// before the epoch still land in `[0, size)`.
#[must_use]
pub fn current_index(
    catalog_size: NonZeroUsize,
    now_unix_seconds: i64,
    period_seconds: NonZeroU64,
) -> usize {
    let window = i128::from(now_unix_seconds).div_euclid(i128::from(period_seconds.get()));
    // usize always fits in i128 on supported targets.
    let size = catalog_size.get() as i128;
    window.rem_euclid(size) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn period(p: u64) -> NonZeroU64 {
        NonZeroU64::new(p).unwrap()
    }

    #[test]
    fn steps_at_window_boundaries() {
        assert_eq!(current_index(size(3), 10, period(5)), 2);
        assert_eq!(current_index(size(3), 14, period(5)), 2);
        assert_eq!(current_index(size(3), 15, period(5)), 0);
        assert_eq!(current_index(size(3), 20, period(5)), 1);
    }

    #[test]
    fn stable_within_a_window() {
        for n in 1..7 {
            for p in 1..9u64 {
                for t in 0..200i64 {
                    let start = t - t.rem_euclid(p as i64);
                    assert_eq!(
                        current_index(size(n), t, period(p)),
                        current_index(size(n), start, period(p)),
                        "n={n} p={p} t={t}"
                    );
                }
            }
        }
    }

    #[test]
    fn single_entry_is_always_current() {
        for t in [-1_000_000, -1, 0, 1, 4, 5, 1_700_000_000, i64::MAX, i64::MIN] {
            assert_eq!(current_index(size(1), t, period(DEFAULT_PERIOD_SECS)), 0);
        }
    }

    #[test]
    fn before_epoch_stays_in_range() {
        assert_eq!(current_index(size(3), -1, period(5)), 2);
        assert_eq!(current_index(size(3), -5, period(5)), 2);
        assert_eq!(current_index(size(3), -6, period(5)), 1);
    }

    #[test]
    fn extreme_inputs_stay_in_range() {
        let idx = current_index(size(7), i64::MAX, period(1));
        assert!(idx < 7);
        let idx = current_index(size(usize::MAX), i64::MIN, period(u64::MAX));
        assert!(idx < usize::MAX);
    }
}
