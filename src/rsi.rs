use std::fmt::Display;

use crate::{
    BarIndex, Indicator, IndicatorState, Ohlcv, Price, PriceSource, TickIndicator,
    config::source_config,
};

source_config! {
    /// Configuration for the Relative Strength Index ([`Rsi`])
    /// indicator.
    ///
    /// RSI uses Wilder's smoothing, which has infinite memory: the
    /// SMA seed (first `period` price changes) influences all
    /// subsequent values. Output begins at bar `period + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use tickflow_ta::{IndicatorConfig, RsiConfig};
    ///
    /// let config = RsiConfig::close(14)?;
    /// assert_eq!(config.period(), 14);
    /// assert_eq!(config.lookback_period(), 14);
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    RsiConfig, RsiConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| period,
}

#[derive(Clone, Debug)]
enum RsiPhase {
    Seeding {
        sum_gain: f64,
        sum_loss: f64,
        changes: usize,
    },
    Active {
        avg_gain: f64,
        avg_loss: f64,
    },
}

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// The first `period` price changes are averaged with a simple
/// mean (SMA seed). After seeding, gains and losses are smoothed
/// with Wilder's method (`α = 1 / period`):
///
/// ```text
/// avg_gain = (prev_avg_gain × (period − 1) + gain) / period
/// avg_loss = (prev_avg_loss × (period − 1) + loss) / period
/// RSI      = 100 × avg_gain / (avg_gain + avg_loss)
/// ```
///
/// A flat series (no gains and no losses) yields 0.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Rsi, RsiConfig};
///
/// let mut rsi = Rsi::new(RsiConfig::close(3)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// // Seeding: need 3 price changes (4 bars)
/// assert_eq!(rsi.compute(&bar(10.0, 1)), None);
/// assert_eq!(rsi.compute(&bar(12.0, 2)), None);
/// assert_eq!(rsi.compute(&bar(11.0, 3)), None);
///
/// // Bar 4: changes = +2, −1, +2 → avg_gain=4/3, avg_loss=1/3 → RSI=80
/// assert_eq!(rsi.compute(&bar(13.0, 4)), Some(80.0));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    state: IndicatorState,
    phase: RsiPhase,
    prev_price: Option<Price>,
    current: Option<Price>,
    period_reciprocal: f64,
    period_minus_one: f64,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            phase: RsiPhase::Seeding {
                sum_gain: 0.0,
                sum_loss: 0.0,
                changes: 0,
            },
            prev_price: None,
            current: None,
            #[allow(clippy::cast_precision_loss)]
            period_reciprocal: 1.0 / config.period as f64,
            #[allow(clippy::cast_precision_loss)]
            period_minus_one: (config.period - 1) as f64,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output> {
        self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl TickIndicator for Rsi {
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        let prev_price = self.prev_price.replace(value)?;
        let (gain, loss) = Self::gain_and_loss(prev_price, value);

        let rsi = match &mut self.phase {
            RsiPhase::Seeding {
                sum_gain,
                sum_loss,
                changes,
            } => {
                *sum_gain += gain;
                *sum_loss += loss;
                *changes += 1;

                if *changes < self.config.period {
                    return None;
                }

                let avg_gain = *sum_gain * self.period_reciprocal;
                let avg_loss = *sum_loss * self.period_reciprocal;
                self.phase = RsiPhase::Active { avg_gain, avg_loss };

                Self::rsi_from_averages(avg_gain, avg_loss)
            }

            RsiPhase::Active { avg_gain, avg_loss } => {
                *avg_gain =
                    avg_gain.mul_add(self.period_minus_one, gain) * self.period_reciprocal;
                *avg_loss =
                    avg_loss.mul_add(self.period_minus_one, loss) * self.period_reciprocal;

                Self::rsi_from_averages(*avg_gain, *avg_loss)
            }
        };

        self.state.record(index, &[rsi]);
        self.current = Some(rsi);

        self.current
    }
}

impl Rsi {
    /// Close-price RSI without period validation, used by StochRSI.
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(RsiConfig {
            period,
            source: PriceSource::Close,
        })
    }

    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (Price, Price) {
        let change = price - prev_price;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        (gain, loss)
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        let sum = avg_gain + avg_loss;
        if sum == 0.0 {
            0.0
        } else {
            100.0 * avg_gain / sum
        }
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.period, self.config.source)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, bar, feed_closes};

    fn rsi(period: usize) -> Rsi {
        Rsi::new(RsiConfig::close(period).unwrap())
    }

    /// Returns a seeded RSI(3) after bars: 10, 12, 11, 13 at indices 1–4.
    fn seeded_rsi3() -> Rsi {
        let mut rsi = rsi(3);
        let _ = feed_closes!(rsi, [10.0, 12.0, 11.0, 13.0]);
        rsi
    }

    mod convergence {
        use super::*;

        #[test]
        fn returns_none_during_seed() {
            let mut rsi = rsi(3);
            assert_eq!(rsi.compute(&bar(10.0, 1)), None);
            assert_eq!(rsi.compute(&bar(12.0, 2)), None);
            assert_eq!(rsi.compute(&bar(11.0, 3)), None);
        }

        #[test]
        fn first_value_at_period_plus_one_bars() {
            let rsi = seeded_rsi3();
            assert!(rsi.value().is_some());
            assert_eq!(rsi.len(), 1);
            assert_eq!(rsi.state().valid_from_bar(), Some(4));
        }

        #[test]
        fn value_matches_last_compute() {
            let mut rsi = seeded_rsi3();
            let computed = rsi.compute(&bar(14.0, 5));
            assert_eq!(rsi.value(), computed);
        }
    }

    mod seed_values {
        use super::*;

        #[test]
        fn all_gains_gives_100() {
            let mut rsi = rsi(3);
            let values = feed_closes!(rsi, [10.0, 11.0, 12.0, 13.0]);
            assert_eq!(values[3], Some(100.0));
        }

        #[test]
        fn all_losses_gives_0() {
            let mut rsi = rsi(3);
            let values = feed_closes!(rsi, [13.0, 12.0, 11.0, 10.0]);
            assert_eq!(values[3], Some(0.0));
        }

        #[test]
        fn equal_gains_and_losses_gives_50() {
            let mut rsi = rsi(2);
            let values = feed_closes!(rsi, [10.0, 11.0, 10.0]);
            assert_eq!(values[2], Some(50.0));
        }

        #[test]
        fn flat_series_gives_0() {
            let mut rsi = rsi(2);
            let values = feed_closes!(rsi, [10.0, 10.0, 10.0, 10.0]);
            assert_eq!(values[2], Some(0.0));
            assert_eq!(values[3], Some(0.0));
        }

        #[test]
        fn seed_rsi_computation() {
            // Changes: +2, -1, +2 → avg_gain=4/3, avg_loss=1/3, RSI=80
            let rsi = seeded_rsi3();
            assert_approx!(rsi.value().unwrap(), 80.0);
        }
    }

    mod wilder_smoothing {
        use super::*;

        #[test]
        fn first_smoothed_value() {
            // Seed: avg_g=4/3, avg_l=1/3
            // Bar 5: change=+1 → avg_g=(4/3*2+1)/3=11/9, avg_l=(1/3*2)/3=2/9
            let mut rsi = seeded_rsi3();
            let value = rsi.compute(&bar(14.0, 5)).unwrap();
            let expected = 100.0 * 11.0 / 13.0;
            assert!((value - expected).abs() < 1e-10);
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn always_between_0_and_100() {
            let mut rsi = rsi(3);
            let prices = [
                100.0, 102.0, 99.0, 101.0, 98.0, 103.0, 97.0, 105.0, 96.0, 104.0, 50.0, 150.0,
            ];
            for value in feed_closes!(rsi, prices).into_iter().flatten() {
                assert!((0.0..=100.0).contains(&value), "RSI out of bounds: {value}");
            }
            assert_eq!(rsi.len(), prices.len() - 3);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(rsi(14).to_string(), "RSI(14, Close)");
        }
    }
}
