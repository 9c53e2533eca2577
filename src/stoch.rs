use std::fmt::Display;

use crate::{
    BarIndex, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorState, Ohlcv, Price,
    PriceSource, Rsi, Sma, TickIndicator,
    error::Result,
    history_window::HistoryWindow,
    indicator::{check_period, rejected, require},
};

/// Stochastic output: %K and %D lines, both in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochValue {
    k: Price,
    d: Price,
}

impl StochValue {
    /// %K line.
    #[inline]
    #[must_use]
    pub fn k(&self) -> Price {
        self.k
    }

    /// %D line: SMA of %K.
    #[inline]
    #[must_use]
    pub fn d(&self) -> Price {
        self.d
    }
}

impl Display for StochValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stoch(k: {}, d: {})", self.k, self.d)
    }
}

/// Position of `value` inside `[low, high]` in percent; 0 for an empty range.
#[inline]
fn percent_of_range(value: Price, low: Price, high: Price) -> Price {
    let range = high - low;
    if range == 0.0 {
        0.0
    } else {
        100.0 * (value - low) / range
    }
}

/// Configuration for the Stochastic Oscillator ([`Stoch`]).
///
/// All three periods must lie in `[1, 100000]`. Default: 5, 3, 3.
///
/// # Example
///
/// ```
/// use tickflow_ta::{IndicatorConfig, StochConfig};
///
/// let config = StochConfig::new(5, 3, 3)?;
/// assert_eq!(config.lookback_period(), 8);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StochConfig {
    fast_k: usize,
    slow_k: usize,
    slow_d: usize,
}

impl IndicatorConfig for StochConfig {
    type Builder = StochConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        StochConfigBuilder::new()
    }

    #[inline]
    fn lookback_period(&self) -> usize {
        self.fast_k + self.slow_k + self.slow_d - 3
    }
}

impl StochConfig {
    /// Config with the given %K window, %K smoothing and %D smoothing.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError`](crate::IndicatorError) if any period is out
    /// of range.
    pub fn new(fast_k: usize, slow_k: usize, slow_d: usize) -> Result<Self> {
        Self::builder()
            .fast_k_period(fast_k)
            .slow_k_period(slow_k)
            .slow_d_period(slow_d)
            .build()
    }

    /// Window of the raw %K high/low range.
    #[inline]
    #[must_use]
    pub fn fast_k_period(&self) -> usize {
        self.fast_k
    }

    /// SMA period applied to raw %K.
    #[inline]
    #[must_use]
    pub fn slow_k_period(&self) -> usize {
        self.slow_k
    }

    /// SMA period applied to slow %K.
    #[inline]
    #[must_use]
    pub fn slow_d_period(&self) -> usize {
        self.slow_d
    }
}

impl Default for StochConfig {
    fn default() -> Self {
        Self {
            fast_k: 5,
            slow_k: 3,
            slow_d: 3,
        }
    }
}

impl Display for StochConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochConfig({}, {}, {})",
            self.fast_k, self.slow_k, self.slow_d
        )
    }
}

/// Builder for [`StochConfig`].
///
/// All three periods must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
#[derive(Clone, Copy, Debug)]
pub struct StochConfigBuilder {
    fast_k: Option<usize>,
    slow_k: Option<usize>,
    slow_d: Option<usize>,
}

impl StochConfigBuilder {
    fn new() -> Self {
        Self {
            fast_k: None,
            slow_k: None,
            slow_d: None,
        }
    }

    /// Sets the raw %K window.
    #[inline]
    #[must_use]
    pub fn fast_k_period(mut self, period: usize) -> Self {
        self.fast_k = Some(period);
        self
    }

    /// Sets the %K smoothing period.
    #[inline]
    #[must_use]
    pub fn slow_k_period(mut self, period: usize) -> Self {
        self.slow_k = Some(period);
        self
    }

    /// Sets the %D smoothing period.
    #[inline]
    #[must_use]
    pub fn slow_d_period(mut self, period: usize) -> Self {
        self.slow_d = Some(period);
        self
    }

    fn validate(self) -> Result<StochConfig> {
        Ok(StochConfig {
            fast_k: check_period("fast_k_period", require("fast_k_period", self.fast_k)?, 1)?,
            slow_k: check_period("slow_k_period", require("slow_k_period", self.slow_k)?, 1)?,
            slow_d: check_period("slow_d_period", require("slow_d_period", self.slow_d)?, 1)?,
        })
    }
}

impl IndicatorConfigBuilder<StochConfig> for StochConfigBuilder {
    fn build(self) -> Result<StochConfig> {
        rejected("StochConfig", self.validate())
    }
}

/// Stochastic Oscillator (slow).
///
/// ```text
/// raw %K  = 100 × (close − LL) / (HH − LL)     over `fast_k` bars
/// slow %K = SMA(raw %K, slow_k)
/// slow %D = SMA(slow %K, slow_d)
/// ```
///
/// A window whose highest high equals its lowest low yields a raw %K of 0.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Stoch, StochConfig};
///
/// let mut stoch = Stoch::new(StochConfig::new(3, 1, 1)?);
/// let bar = |high, low, close, index| Bar::new(close, high, low, close, 0.0).at(index);
///
/// stoch.compute(&bar(10.0, 8.0, 9.0, 1));
/// stoch.compute(&bar(12.0, 9.0, 11.0, 2));
/// let value = stoch.compute(&bar(11.0, 6.0, 9.0, 3)).unwrap();
/// // HH 12, LL 6 → 100 × 3 / 6
/// assert_eq!(value.k(), 50.0);
/// assert_eq!(value.d(), 50.0);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Stoch {
    config: StochConfig,
    state: IndicatorState,
    highs: HistoryWindow,
    lows: HistoryWindow,
    slow_k: Sma,
    slow_d: Sma,
    current: Option<StochValue>,
}

impl Indicator for Stoch {
    type Config = StochConfig;
    type Output = StochValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.lookback_period()),
            highs: HistoryWindow::new(config.fast_k),
            lows: HistoryWindow::new(config.fast_k),
            slow_k: Sma::with_period(config.slow_k),
            slow_d: Sma::with_period(config.slow_d),
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<StochValue> {
        let index = ohlcv.index();

        self.highs.push(ohlcv.high());
        self.lows.push(ohlcv.low());

        if !self.highs.is_full() {
            return None;
        }

        let raw_k = percent_of_range(ohlcv.close(), self.lows.min()?, self.highs.max()?);
        let k = self.slow_k.compute_tick(raw_k, index)?;
        let d = self.slow_d.compute_tick(k, index)?;

        let result = StochValue { k, d };
        self.state.record(index, &[k, d]);
        self.current = Some(result);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<StochValue> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl Display for Stoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "STOCH({}, {}, {})",
            self.config.fast_k, self.config.slow_k, self.config.slow_d
        )
    }
}

/// Configuration for the Stochastic RSI ([`StochRsi`]).
///
/// `period` must lie in `[2, 100000]`, `fast_k` and `fast_d` in
/// `[1, 100000]`. Default: 14, 5, 3 on close.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StochRsiConfig {
    period: usize,
    fast_k: usize,
    fast_d: usize,
    source: PriceSource,
}

impl IndicatorConfig for StochRsiConfig {
    type Builder = StochRsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        StochRsiConfigBuilder::new()
    }

    #[inline]
    fn lookback_period(&self) -> usize {
        self.period + self.fast_k + self.fast_d - 2
    }
}

impl StochRsiConfig {
    /// StochRSI on closing price.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError`](crate::IndicatorError) if any period is out
    /// of range.
    pub fn close(period: usize, fast_k: usize, fast_d: usize) -> Result<Self> {
        Self::builder()
            .period(period)
            .fast_k_period(fast_k)
            .fast_d_period(fast_d)
            .build()
    }

    /// RSI period.
    #[inline]
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    /// Window of the RSI high/low range.
    #[inline]
    #[must_use]
    pub fn fast_k_period(&self) -> usize {
        self.fast_k
    }

    /// SMA period applied to %K.
    #[inline]
    #[must_use]
    pub fn fast_d_period(&self) -> usize {
        self.fast_d
    }

    /// Scalar extracted from each bar.
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for StochRsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            fast_k: 5,
            fast_d: 3,
            source: PriceSource::Close,
        }
    }
}

impl Display for StochRsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochRsiConfig({}, {}, {}, {})",
            self.period, self.fast_k, self.fast_d, self.source
        )
    }
}

/// Builder for [`StochRsiConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
#[derive(Clone, Copy, Debug)]
pub struct StochRsiConfigBuilder {
    period: Option<usize>,
    fast_k: Option<usize>,
    fast_d: Option<usize>,
    source: PriceSource,
}

impl StochRsiConfigBuilder {
    fn new() -> Self {
        Self {
            period: None,
            fast_k: None,
            fast_d: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the RSI period.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period = Some(period);
        self
    }

    /// Sets the %K window.
    #[inline]
    #[must_use]
    pub fn fast_k_period(mut self, period: usize) -> Self {
        self.fast_k = Some(period);
        self
    }

    /// Sets the %D smoothing period.
    #[inline]
    #[must_use]
    pub fn fast_d_period(mut self, period: usize) -> Self {
        self.fast_d = Some(period);
        self
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn validate(self) -> Result<StochRsiConfig> {
        Ok(StochRsiConfig {
            period: check_period("period", require("period", self.period)?, 2)?,
            fast_k: check_period("fast_k_period", require("fast_k_period", self.fast_k)?, 1)?,
            fast_d: check_period("fast_d_period", require("fast_d_period", self.fast_d)?, 1)?,
            source: self.source,
        })
    }
}

impl IndicatorConfigBuilder<StochRsiConfig> for StochRsiConfigBuilder {
    fn build(self) -> Result<StochRsiConfig> {
        rejected("StochRsiConfig", self.validate())
    }
}

/// Stochastic RSI.
///
/// The fast stochastic applied to [`Rsi`] instead of price:
///
/// ```text
/// %K = 100 × (RSI − min RSI) / (max RSI − min RSI)   over `fast_k` values
/// %D = SMA(%K, fast_d)
/// ```
///
/// A flat RSI window yields a %K of 0.
#[derive(Clone, Debug)]
pub struct StochRsi {
    config: StochRsiConfig,
    state: IndicatorState,
    rsi: Rsi,
    history: HistoryWindow,
    fast_d: Sma,
    current: Option<StochValue>,
}

impl Indicator for StochRsi {
    type Config = StochRsiConfig;
    type Output = StochValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.lookback_period()),
            rsi: Rsi::with_period(config.period),
            history: HistoryWindow::new(config.fast_k),
            fast_d: Sma::with_period(config.fast_d),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<StochValue> {
        self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
    }

    #[inline]
    fn value(&self) -> Option<StochValue> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl TickIndicator for StochRsi {
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<StochValue> {
        let rsi = self.rsi.compute_tick(value, index)?;
        self.history.push(rsi);

        if !self.history.is_full() {
            return None;
        }

        let k = percent_of_range(rsi, self.history.min()?, self.history.max()?);
        let d = self.fast_d.compute_tick(k, index)?;

        let result = StochValue { k, d };
        self.state.record(index, &[k, d]);
        self.current = Some(result);

        self.current
    }
}

impl Display for StochRsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "STOCHRSI({}, {}, {}, {})",
            self.config.period, self.config.fast_k, self.config.fast_d, self.config.source
        )
    }
}
