use std::fmt::Display;

use crate::{
    BarIndex, Ema, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorState, Ohlcv,
    Price, PriceSource, TickIndicator,
    error::Result,
    indicator::{check_period, rejected, require},
};

/// Configuration for the Moving Average Convergence/Divergence ([`Macd`])
/// indicator.
///
/// `fast` and `slow` must lie in `[2, 100000]`, `signal` in `[1, 100000]`.
/// A fast period longer than the slow one is swapped on build.
///
/// # Example
///
/// ```
/// use tickflow_ta::{IndicatorConfig, MacdConfig};
///
/// let config = MacdConfig::close(12, 26, 9)?;
/// assert_eq!(config.lookback_period(), 33);
///
/// let swapped = MacdConfig::close(26, 12, 9)?;
/// assert_eq!(swapped, config);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn lookback_period(&self) -> usize {
        self.slow + self.signal - 2
    }
}

impl MacdConfig {
    /// MACD on closing price.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError`](crate::IndicatorError) if any period is out
    /// of range.
    pub fn close(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        Self::builder()
            .fast_period(fast)
            .slow_period(slow)
            .signal_period(signal)
            .build()
    }

    /// Fast EMA period.
    #[inline]
    #[must_use]
    pub fn fast_period(&self) -> usize {
        self.fast
    }

    /// Slow EMA period.
    #[inline]
    #[must_use]
    pub fn slow_period(&self) -> usize {
        self.slow
    }

    /// Signal EMA period.
    #[inline]
    #[must_use]
    pub fn signal_period(&self) -> usize {
        self.signal
    }

    /// Scalar extracted from each bar.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            source: PriceSource::Close,
        }
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// All three periods must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
#[derive(Clone, Copy, Debug)]
pub struct MacdConfigBuilder {
    fast: Option<usize>,
    slow: Option<usize>,
    signal: Option<usize>,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: None,
            slow: None,
            signal: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the fast EMA period.
    #[inline]
    #[must_use]
    pub fn fast_period(mut self, period: usize) -> Self {
        self.fast = Some(period);
        self
    }

    /// Sets the slow EMA period.
    #[inline]
    #[must_use]
    pub fn slow_period(mut self, period: usize) -> Self {
        self.slow = Some(period);
        self
    }

    /// Sets the signal EMA period.
    #[inline]
    #[must_use]
    pub fn signal_period(mut self, period: usize) -> Self {
        self.signal = Some(period);
        self
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn validate(self) -> Result<MacdConfig> {
        let fast = check_period("fast_period", require("fast_period", self.fast)?, 2)?;
        let slow = check_period("slow_period", require("slow_period", self.slow)?, 2)?;
        let signal = check_period("signal_period", require("signal_period", self.signal)?, 1)?;

        let (fast, slow) = if fast > slow {
            (slow, fast)
        } else {
            (fast, slow)
        };

        Ok(MacdConfig {
            fast,
            slow,
            signal,
            source: self.source,
        })
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    fn build(self) -> Result<MacdConfig> {
        rejected("MacdConfig", self.validate())
    }
}

/// MACD output: MACD line, signal line and histogram.
///
/// ```text
/// macd      = EMA(fast) − EMA(slow)
/// signal    = EMA(macd, signal)
/// histogram = macd − signal
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdValue {
    macd: Price,
    signal: Price,
    histogram: Price,
}

impl MacdValue {
    /// Difference between the fast and slow EMAs.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Price {
        self.signal
    }

    /// `macd − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(m: {}, s: {}, h: {})",
            self.macd, self.signal, self.histogram
        )
    }
}

/// Moving Average Convergence/Divergence (MACD).
///
/// Three chained EMAs. The fast EMA skips its first `slow − fast` values so
/// that it becomes valid on the same bar as the slow EMA. Every slow EMA
/// value yields a MACD value that feeds the signal EMA; every signal value
/// produces one [`MacdValue`].
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Macd, MacdConfig};
///
/// let mut macd = Macd::new(MacdConfig::close(2, 3, 2)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// // lookback = 3 + 2 − 2 = 3
/// assert!(macd.compute(&bar(1.0, 1)).is_none());
/// assert!(macd.compute(&bar(2.0, 2)).is_none());
/// assert!(macd.compute(&bar(3.0, 3)).is_none());
/// assert!(macd.compute(&bar(4.0, 4)).is_some());
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    state: IndicatorState,
    fast: Ema,
    slow: Ema,
    signal: Ema,
    fast_skip: usize,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.lookback_period()),
            fast: Ema::with_period(config.fast),
            slow: Ema::with_period(config.slow),
            signal: Ema::with_period(config.signal),
            fast_skip: config.slow - config.fast,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<MacdValue> {
        self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl TickIndicator for Macd {
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<MacdValue> {
        if self.fast_skip > 0 {
            self.fast_skip -= 1;
        } else {
            self.fast.compute_tick(value, index);
        }

        let slow = self.slow.compute_tick(value, index)?;
        let fast = self.fast.value()?;

        let macd = fast - slow;
        let signal = self.signal.compute_tick(macd, index)?;

        let result = MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        };
        self.state.record(index, &[result.macd, result.signal, result.histogram]);
        self.current = Some(result);

        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}
