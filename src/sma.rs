use std::fmt::Display;

use crate::{
    BarIndex, Indicator, IndicatorState, Ohlcv, Price, TickIndicator, config::source_config,
    history_window::HistoryWindow,
};

source_config! {
    /// Configuration for the Simple Moving Average ([`Sma`]) indicator.
    ///
    /// Period must lie in `[2, 100000]`. Default: 20 bars on close.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tickflow_ta::{IndicatorConfig, SmaConfig};
    ///
    /// let config = SmaConfig::close(20)?;
    /// assert_eq!(config.period(), 20);
    /// assert_eq!(config.lookback_period(), 19);
    /// assert!(SmaConfig::close(1).is_err());
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    SmaConfig, SmaConfigBuilder,
    min = 2,
    default = 20,
    lookback = |period| period - 1,
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* values, where *n* is the
/// configured period. Returns `None` until the window is full.
///
/// Uses a running sum for O(1) updates per bar.
///
/// # Example
///
/// ```rust
/// use tickflow_ta::{Bar, Sma, SmaConfig};
///
/// let mut sma = Sma::new(SmaConfig::close(3)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// assert_eq!(sma.compute(&bar(10.0, 1)), None);
/// assert_eq!(sma.compute(&bar(20.0, 2)), None);
/// assert_eq!(sma.compute(&bar(30.0, 3)), Some(20.0));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    state: IndicatorState,
    window: HistoryWindow,
    sum: f64,
    period_reciprocal: f64,
    current: Option<Price>,
}

impl Sma {
    /// Close-price SMA without period validation. Composites use this for
    /// internal smoothing stages that accept a period of 1.
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(SmaConfig {
            period,
            source: crate::PriceSource::Close,
        })
    }
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period - 1),
            window: HistoryWindow::new(config.period),
            sum: 0.0,
            #[allow(clippy::cast_precision_loss)]
            period_reciprocal: 1.0 / config.period as f64,
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

impl TickIndicator for Sma {
    #[inline]
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        if let Some(evicted) = self.window.push(value) {
            self.sum -= evicted;
        }
        self.sum += value;

        if !self.window.is_full() {
            return None;
        }

        let sma = self.sum * self.period_reciprocal;
        self.state.record(index, &[sma]);
        self.current = Some(sma);

        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.period, self.config.source)
    }
}
