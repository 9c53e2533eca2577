use std::fmt::Display;

use crate::{
    Adx, Indicator, IndicatorState, Ohlcv, Price, config::period_config,
    history_window::HistoryWindow,
};

period_config! {
    /// Configuration for the Average Directional Movement Index Rating
    /// ([`Adxr`]).
    ///
    /// Period must lie in `[2, 100000]`. Default: 14.
    AdxrConfig, AdxrConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| 3 * period - 2,
}

/// Average Directional Movement Index Rating (ADXR).
///
/// Average of the current [`Adx`] and the ADX from `period − 1` bars
/// earlier, i.e. the oldest entry of a window holding the last `period` ADX
/// values:
///
/// ```text
/// ADXR = (ADX + ADX[period − 1 bars ago]) / 2
/// ```
#[derive(Clone, Debug)]
pub struct Adxr {
    config: AdxrConfig,
    state: IndicatorState,
    adx: Adx,
    history: HistoryWindow,
    current: Option<Price>,
}

impl Indicator for Adxr {
    type Config = AdxrConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(3 * config.period - 2),
            adx: Adx::with_period(config.period),
            history: HistoryWindow::new(config.period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let adx = self.adx.compute(ohlcv)?;
        self.history.push(adx);

        if !self.history.is_full() {
            return None;
        }

        let lagged = self.history.oldest()?;
        let adxr = f64::midpoint(adx, lagged);

        self.state.record(ohlcv.index(), &[adxr]);
        self.current = Some(adxr);

        self.current
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

impl Display for Adxr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ADXR({})", self.config.period)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{AdxConfig, test_util::hlc};

    fn wave(index: u64) -> crate::Bar {
        let base = 20.0 + (index as f64 * 0.7).sin() * 5.0;
        hlc(base + 1.5, base - 1.0, base + 0.25, index)
    }

    #[test]
    fn lookback_is_three_periods_minus_two() {
        let mut adxr = Adxr::new(AdxrConfig::new(3).unwrap());
        assert_eq!(adxr.lookback_period(), 7);
        for index in 1..=7 {
            assert_eq!(adxr.compute(&wave(index)), None);
        }
        assert!(adxr.compute(&wave(8)).is_some());
        assert_eq!(adxr.len(), 1);
    }

    #[test]
    fn averages_current_and_lagged_adx() {
        let period = 3;
        let mut adxr = Adxr::new(AdxrConfig::new(period).unwrap());
        let mut adx = Adx::new(AdxConfig::new(period).unwrap());

        let mut adx_values = Vec::new();
        let mut adxr_values = Vec::new();
        for index in 1..=20 {
            let bar = wave(index);
            if let Some(v) = adx.compute(&bar) {
                adx_values.push(v);
            }
            if let Some(v) = adxr.compute(&bar) {
                adxr_values.push(v);
            }
        }

        assert_eq!(adxr_values.len(), adx_values.len() - (period - 1));
        for (i, value) in adxr_values.iter().enumerate() {
            let expected = f64::midpoint(adx_values[i + period - 1], adx_values[i]);
            assert_eq!(*value, expected);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Adxr::new(AdxrConfig::default()).to_string(), "ADXR(14)");
    }
}
