#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use tickflow_ta::{BarIndex, Ohlcv, Price};

/// Reference outputs are rounded to 10 decimals and the bars to cents; 0.01
/// leaves room for seed and smoothing drift on every indicator.
pub const TOLERANCE: f64 = 0.01;

/// One daily bar from `bars-1d.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub index: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn index(&self) -> BarIndex {
        self.index
    }
}

/// Rows keyed by the bar they belong to.
pub trait Indexed {
    fn index(&self) -> BarIndex;
}

/// Single-value reference row.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub index: u64,
    pub expected: f64,
}

/// MACD reference row.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub index: u64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Aroon reference row.
#[derive(Debug, Deserialize)]
pub struct RefAroonValue {
    pub index: u64,
    pub up: f64,
    pub down: f64,
}

/// Stochastic / StochRSI reference row.
#[derive(Debug, Deserialize)]
pub struct RefStochValue {
    pub index: u64,
    pub k: f64,
    pub d: f64,
}

macro_rules! indexed {
    ($($row:ty),+) => {
        $(impl Indexed for $row {
            fn index(&self) -> BarIndex {
                self.index
            }
        })+
    };
}

indexed!(RefValue, RefMacdValue, RefAroonValue, RefStochValue);

const BARS_PATH: &str = "tests/fixtures/data/bars-1d.csv";

/// Load the year of daily reference bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(BARS_PATH)
}

/// Load single-value reference data.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path)
}

/// Load any reference file whose rows deserialize into `D`.
pub fn load_records<D>(path: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize()
        .map(|r| r.unwrap_or_else(|e| panic!("invalid record in {path}: {e}")))
        .collect()
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Feeds every bar to `compute` and checks each result against the reference
/// row for the same bar.
///
/// A bar with a reference row must produce a value; a bar without one must
/// not. Every reference row must be visited.
pub fn assert_matches_reference<R, T>(
    name: &str,
    bars: &[RefBar],
    reference: &[R],
    mut compute: impl FnMut(&RefBar) -> Option<T>,
    mut check: impl FnMut(&T, &R, &str),
) where
    R: Indexed,
    T: std::fmt::Debug,
{
    let mut ref_idx = 0;
    for bar in bars {
        let value = compute(bar);
        let context = format!("{name} at bar {}", bar.index);

        match reference.get(ref_idx) {
            Some(row) if row.index() == bar.index => {
                let value = value.unwrap_or_else(|| panic!("{context}: returned None"));
                check(&value, row, &context);
                ref_idx += 1;
            }
            _ => assert!(value.is_none(), "{context}: unexpected {value:?}"),
        }
    }

    assert_eq!(
        ref_idx,
        reference.len(),
        "{name}: not all reference values checked: {ref_idx}/{}",
        reference.len()
    );
}

/// Generate a reference match test for a single-value indicator.
///
/// Usage: `reference_test!(sma_10, Sma, SmaConfig::close(10), "tests/fixtures/data/sma-10-close.csv");`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr) => {
        mod $name {
            use super::fixtures::*;
            use tickflow_ta::*;

            #[test]
            fn matches_reference() {
                let bars = load_reference_bars();
                let reference = load_ref_values($ref_path);
                let mut ind = <$ind>::new($config.unwrap());

                assert_matches_reference(
                    stringify!($name),
                    &bars,
                    &reference,
                    |bar| ind.compute(bar),
                    |value, row, context| assert_near(*value, row.expected, TOLERANCE, context),
                );

                assert_eq!(ind.len(), reference.len());
                assert_eq!(
                    ind.state().valid_from_bar(),
                    reference.first().map(|row| row.index)
                );
            }

            #[test]
            fn lookback_matches_first_reference_bar() {
                let reference = load_ref_values($ref_path);
                let ind = <$ind>::new($config.unwrap());
                let first = reference.first().map(|row| row.index);
                assert_eq!(first, Some(ind.lookback_period() as u64 + 1));
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;
