use crate::{Bar, BarIndex};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON` (absolute near zero).
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs().max(1.0) * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Bar with open, high, low and close all equal to `close`.
pub(crate) fn bar(close: f64, index: BarIndex) -> Bar {
    Bar::new(close, close, close, close, 0.0).at(index)
}

/// Bar with distinct high, low and close. Open is set to close.
pub(crate) fn hlc(high: f64, low: f64, close: f64, index: BarIndex) -> Bar {
    Bar::new(close, high, low, close, 0.0).at(index)
}

/// Feeds `closes` as consecutive bars starting at index 1 and collects every
/// result, `None`s included.
macro_rules! feed_closes {
    ($indicator:expr, $closes:expr) => {{
        let indicator = &mut $indicator;
        $closes
            .iter()
            .zip(1_u64..)
            .map(|(&close, index)| indicator.compute(&$crate::test_util::bar(close, index)))
            .collect::<Vec<_>>()
    }};
}

pub(crate) use feed_closes;
