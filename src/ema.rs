use std::fmt::Display;

use crate::{
    BarIndex, Indicator, IndicatorState, Ohlcv, Price, PriceSource, Sma, TickIndicator,
    config::source_config,
};

source_config! {
    /// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
    ///
    /// Period must lie in `[2, 100000]`. Default: 20 bars on close.
    ///
    /// # Example
    ///
    /// ```
    /// use tickflow_ta::{EmaConfig, IndicatorConfig, IndicatorConfigBuilder, PriceSource};
    ///
    /// let config = EmaConfig::builder()
    ///     .period(20)
    ///     .source(PriceSource::HL2)
    ///     .build()?;
    ///
    /// assert_eq!(config.period(), 20);
    /// assert_eq!(config.lookback_period(), 19);
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    EmaConfig, EmaConfigBuilder,
    min = 2,
    default = 20,
    lookback = |period| period - 1,
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (period + 1)`. Each value is computed as:
///
/// ```text
/// EMA = prev_EMA + α × (price − prev_EMA)
/// ```
///
/// The first `period` bars are collected to compute an SMA
/// seed value. After seeding, the SMA state is dropped and
/// the EMA runs with O(1) constant memory per tick via a
/// single fused multiply-add.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Ema, EmaConfig};
///
/// let mut ema = Ema::new(EmaConfig::close(3)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// // Seeding phase: collecting SMA
/// assert_eq!(ema.compute(&bar(2.0, 1)), None);
/// assert_eq!(ema.compute(&bar(4.0, 2)), None);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.compute(&bar(6.0, 3)), Some(4.0));
///
/// // EMA(3) α = 0.5: 4 + 0.5 × (8 − 4) = 6.0
/// assert_eq!(ema.compute(&bar(8.0, 4)), Some(6.0));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    state: IndicatorState,
    seed: Option<Sma>,
    alpha: f64,
    current: Option<Price>,
}

impl Ema {
    /// Close-price EMA without period validation. MACD's signal line accepts
    /// a period of 1.
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(EmaConfig {
            period,
            source: PriceSource::Close,
        })
    }
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period - 1),
            seed: Some(Sma::with_period(config.period)),
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (config.period + 1) as f64,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl TickIndicator for Ema {
    #[inline]
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        let ema = match (self.seed.as_mut(), self.current) {
            (Some(seed), _) => {
                let sma = seed.compute_tick(value, index)?;
                self.seed = None;
                sma
            }
            (None, Some(previous)) => self.alpha.mul_add(value - previous, previous),
            (None, None) => return None,
        };

        self.state.record(index, &[ema]);
        self.current = Some(ema);

        self.current
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.period, self.config.source)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{
        IndicatorConfig, IndicatorConfigBuilder,
        test_util::{assert_approx, bar, feed_closes},
    };

    fn ema(period: usize) -> Ema {
        Ema::new(EmaConfig::close(period).unwrap())
    }

    mod seeding {
        use super::*;

        #[test]
        fn none_during_sma_phase() {
            let mut ema = ema(3);
            assert_eq!(ema.compute(&bar(2.0, 1)), None);
            assert_eq!(ema.compute(&bar(4.0, 2)), None);
            assert_eq!(ema.len(), 0);
        }

        #[test]
        fn first_value_is_sma_seed() {
            let mut ema = ema(3);
            ema.compute(&bar(2.0, 1));
            ema.compute(&bar(4.0, 2));
            assert_eq!(ema.compute(&bar(6.0, 3)), Some(4.0));
            assert_eq!(ema.state().valid_from_bar(), Some(3));
        }

        #[test]
        fn drops_seed_after_first_value() {
            let mut ema = ema(2);
            ema.compute(&bar(1.0, 1));
            assert!(ema.seed.is_some());
            ema.compute(&bar(3.0, 2));
            assert!(ema.seed.is_none());
        }
    }

    mod recurrence {
        use super::*;

        #[test]
        fn applies_smoothing_factor() {
            let mut ema = ema(3);
            // seed 4.0, α = 0.5
            let values = feed_closes!(ema, [2.0, 4.0, 6.0, 8.0, 2.0]);
            assert_eq!(values[3], Some(6.0));
            // 6 + 0.5 × (2 − 6) = 4
            assert_eq!(values[4], Some(4.0));
        }

        #[test]
        fn alpha_for_period_four() {
            let mut ema = ema(4);
            // seed = 2.5, α = 0.4
            let values = feed_closes!(ema, [1.0, 2.0, 3.0, 4.0, 10.0]);
            // 2.5 + 0.4 × 7.5 = 5.5
            assert_approx!(values[4].unwrap(), 5.5);
        }

        #[test]
        fn converges_on_constant_input() {
            let mut ema = ema(5);
            let values = feed_closes!(ema, [7.0; 20]);
            assert!(values.iter().flatten().all(|&v| v == 7.0));
            assert_eq!(ema.len(), 16);
        }

        #[test]
        fn period_one_tracks_input() {
            let mut ema = Ema::with_period(1);
            assert_eq!(ema.lookback_period(), 0);
            assert_eq!(ema.compute_tick(3.0, 1), Some(3.0));
            assert_eq!(ema.compute_tick(5.0, 2), Some(5.0));
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(ema(12).to_string(), "EMA(12, Close)");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut ema = ema(2);
            ema.compute(&bar(10.0, 1));
            let mut cloned = ema.clone();

            assert_eq!(ema.compute(&bar(20.0, 2)), Some(15.0));
            assert_eq!(cloned.value(), None);
            assert_eq!(cloned.compute(&bar(30.0, 2)), Some(20.0));
        }
    }

    mod config {
        use super::*;

        #[test]
        fn lookback_is_period_minus_one() {
            assert_eq!(EmaConfig::close(10).unwrap().lookback_period(), 9);
        }

        #[test]
        fn builder_requires_period() {
            assert!(EmaConfig::builder().build().is_err());
        }

        #[test]
        fn display_config() {
            let config = EmaConfig::with_source(9, PriceSource::OHLC4).unwrap();
            assert_eq!(config.to_string(), "EmaConfig(9, OHLC4)");
        }
    }
}
