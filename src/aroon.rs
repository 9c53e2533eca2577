use std::fmt::Display;

use crate::{
    Indicator, IndicatorState, Ohlcv, Price, config::period_config, history_window::HistoryWindow,
};

period_config! {
    /// Configuration for [`Aroon`] and [`AroonOsc`].
    ///
    /// Period must lie in `[2, 100000]`. Default: 14.
    ///
    /// # Example
    ///
    /// ```
    /// use tickflow_ta::{AroonConfig, IndicatorConfig};
    ///
    /// let config = AroonConfig::new(25)?;
    /// assert_eq!(config.lookback_period(), 25);
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    AroonConfig, AroonConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| period,
}

/// Aroon output: up and down lines, both in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AroonValue {
    up: Price,
    down: Price,
}

impl AroonValue {
    /// Recency of the highest high: 100 when it is the current bar.
    #[inline]
    #[must_use]
    pub fn up(&self) -> Price {
        self.up
    }

    /// Recency of the lowest low: 100 when it is the current bar.
    #[inline]
    #[must_use]
    pub fn down(&self) -> Price {
        self.down
    }

    /// `up − down`, the value [`AroonOsc`] reports.
    #[inline]
    #[must_use]
    pub fn oscillator(&self) -> Price {
        self.up - self.down
    }
}

impl Display for AroonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Aroon(u: {}, d: {})", self.up, self.down)
    }
}

/// Aroon indicator.
///
/// Over the last `period + 1` bars, measures how long ago the highest high
/// and the lowest low occurred:
///
/// ```text
/// up   = 100 / period × (period − bars since highest high)
/// down = 100 / period × (period − bars since lowest low)
/// ```
///
/// When the extreme occurs more than once in the window, the most recent
/// occurrence counts.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Aroon, AroonConfig, Bar};
///
/// let mut aroon = Aroon::new(AroonConfig::new(2)?);
/// let bar = |high, low, index| Bar::new(low, high, low, low, 0.0).at(index);
///
/// aroon.compute(&bar(12.0, 8.0, 1));
/// aroon.compute(&bar(11.0, 9.0, 2));
/// let value = aroon.compute(&bar(10.0, 7.0, 3)).unwrap();
///
/// assert_eq!(value.up(), 0.0);    // high 12 was two bars ago
/// assert_eq!(value.down(), 100.0); // low 7 is the current bar
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Aroon {
    config: AroonConfig,
    state: IndicatorState,
    highs: HistoryWindow,
    lows: HistoryWindow,
    period: f64,
    current: Option<AroonValue>,
}

impl Aroon {
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(AroonConfig { period })
    }

    #[allow(clippy::cast_precision_loss)]
    fn line(&self, bars_since: usize) -> Price {
        100.0 * (self.config.period - bars_since) as f64 / self.period
    }
}

impl Indicator for Aroon {
    type Config = AroonConfig;
    type Output = AroonValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            highs: HistoryWindow::new(config.period + 1),
            lows: HistoryWindow::new(config.period + 1),
            #[allow(clippy::cast_precision_loss)]
            period: config.period as f64,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<AroonValue> {
        self.highs.push(ohlcv.high());
        self.lows.push(ohlcv.low());

        if !self.highs.is_full() {
            return None;
        }

        let since_high = self.highs.bars_since_max(true)?;
        let since_low = self.lows.bars_since_min(true)?;

        let result = AroonValue {
            up: self.line(since_high),
            down: self.line(since_low),
        };
        self.state.record(ohlcv.index(), &[result.up, result.down]);
        self.current = Some(result);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<AroonValue> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl Display for Aroon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AROON({})", self.config.period)
    }
}

/// Aroon Oscillator: [`Aroon`] up minus down, in `[−100, 100]`.
#[derive(Clone, Debug)]
pub struct AroonOsc {
    config: AroonConfig,
    state: IndicatorState,
    aroon: Aroon,
    current: Option<Price>,
}

impl Indicator for AroonOsc {
    type Config = AroonConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            aroon: Aroon::with_period(config.period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let oscillator = self.aroon.compute(ohlcv)?.oscillator();

        self.state.record(ohlcv.index(), &[oscillator]);
        self.current = Some(oscillator);

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

impl Display for AroonOsc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AROONOSC({})", self.config.period)
    }
}
