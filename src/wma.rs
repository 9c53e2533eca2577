use std::fmt::Display;

use crate::{
    BarIndex, Indicator, IndicatorState, Ohlcv, Price, TickIndicator, config::source_config,
    history_window::HistoryWindow,
};

source_config! {
    /// Configuration for the Weighted Moving Average ([`Wma`]) indicator.
    ///
    /// Period must lie in `[2, 100000]`. Default: 20 bars on close.
    WmaConfig, WmaConfigBuilder,
    min = 2,
    default = 20,
    lookback = |period| period - 1,
}

/// Weighted Moving Average (WMA).
///
/// Linearly weighted mean of the last *n* values: the oldest value has
/// weight 1 and the newest weight *n*, normalised by `n(n + 1) / 2`.
///
/// Both the plain sum and the weighted sum are carried between bars, so an
/// update is O(1) regardless of period:
///
/// ```text
/// weighted' = weighted − sum + n × price
/// sum'      = sum − oldest + price
/// ```
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Wma, WmaConfig};
///
/// let mut wma = Wma::new(WmaConfig::close(3)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// assert_eq!(wma.compute(&bar(1.0, 1)), None);
/// assert_eq!(wma.compute(&bar(2.0, 2)), None);
/// // (1×1 + 2×2 + 3×3) / 6
/// assert_eq!(wma.compute(&bar(3.0, 3)), Some(14.0 / 6.0));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Wma {
    config: WmaConfig,
    state: IndicatorState,
    window: HistoryWindow,
    sum: f64,
    weighted_sum: f64,
    period: f64,
    divisor: f64,
    current: Option<Price>,
}

impl Indicator for Wma {
    type Config = WmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let period = config.period as f64;

        Self {
            config,
            state: IndicatorState::new(config.period - 1),
            window: HistoryWindow::new(config.period),
            sum: 0.0,
            weighted_sum: 0.0,
            period,
            divisor: period * (period + 1.0) / 2.0,
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

impl TickIndicator for Wma {
    #[inline]
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        match self.window.push(value) {
            Some(oldest) => {
                self.weighted_sum += self.period.mul_add(value, -self.sum);
                self.sum += value - oldest;
            }
            None => {
                #[allow(clippy::cast_precision_loss)]
                let weight = self.window.len() as f64;
                self.weighted_sum += weight * value;
                self.sum += value;
            }
        }

        if !self.window.is_full() {
            return None;
        }

        let wma = self.weighted_sum / self.divisor;
        self.state.record(index, &[wma]);
        self.current = Some(wma);

        self.current
    }
}

impl Display for Wma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WMA({}, {})", self.config.period, self.config.source)
    }
}
