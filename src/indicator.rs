use crate::{BarIndex, IndicatorError, Ohlcv, Price, error::Result};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Largest period any indicator accepts.
pub const MAXIMUM_PERIOD: usize = 100_000;

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (periods, price source). Configs are validated value types: a config can
/// only be obtained from a successful [`build`](IndicatorConfigBuilder::build),
/// so an indicator created from one never fails.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Number of leading bars for which the configured indicator emits
    /// nothing.
    fn lookback_period(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Validates the parameters and builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError`] if a required parameter is missing or a
    /// period lies outside the indicator's accepted range.
    fn build(self) -> Result<Config>;
}

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call to
/// [`compute`](Indicator::compute). The first
/// [`lookback_period`](Indicator::lookback_period) bars produce `None`; every
/// bar after that produces exactly one value.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Indicator, Sma, SmaConfig};
///
/// let mut sma = Sma::new(SmaConfig::close(3)?);
///
/// assert_eq!(sma.compute(&Bar::new(10.0, 10.0, 10.0, 10.0, 0.0).at(1)), None);
/// assert_eq!(sma.compute(&Bar::new(20.0, 20.0, 20.0, 20.0, 0.0).at(2)), None);
/// assert_eq!(sma.compute(&Bar::new(30.0, 30.0, 30.0, 30.0, 0.0).at(3)), Some(20.0));
/// assert_eq!(sma.lookback_period(), 2);
/// assert_eq!(sma.len(), 1);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for multi-channel ones (e.g. MACD).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Creates a new indicator from a validated config.
    fn new(config: Self::Config) -> Self;

    /// Feeds a bar and returns the value produced for it, or `None` while
    /// the indicator is still inside its lookback period.
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last produced value without advancing state.
    fn value(&self) -> Option<Self::Output>;

    /// Bookkeeping shared by every indicator.
    fn state(&self) -> &IndicatorState;

    /// Number of leading bars for which no value is produced.
    #[inline]
    fn lookback_period(&self) -> usize {
        self.state().lookback_period()
    }

    /// Number of values produced so far.
    #[inline]
    fn len(&self) -> usize {
        self.state().len()
    }

    /// `true` until the first value has been produced.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An [`Indicator`] whose recurrence runs on a single scalar series.
///
/// [`compute`](Indicator::compute) extracts the configured
/// [`PriceSource`](crate::PriceSource) and forwards to
/// [`compute_tick`](TickIndicator::compute_tick); composites call
/// `compute_tick` directly to chain indicators on derived series.
pub trait TickIndicator: Indicator {
    /// Feeds one scalar observed at bar `index`.
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Self::Output>;
}

/// Lookback gating, result counting and lifetime bounds shared by every
/// indicator.
///
/// `min`/`max` track every component of every emitted value (for MACD, the
/// MACD line, signal and histogram alike) over the indicator's whole life.
#[derive(Clone, Debug)]
pub struct IndicatorState {
    lookback_period: usize,
    len: usize,
    valid_from_bar: Option<BarIndex>,
    last_bar: Option<BarIndex>,
    min: f64,
    max: f64,
}

impl IndicatorState {
    pub(crate) fn new(lookback_period: usize) -> Self {
        Self {
            lookback_period,
            len: 0,
            valid_from_bar: None,
            last_bar: None,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Records one emitted result at bar `index`.
    pub(crate) fn record(&mut self, index: BarIndex, values: &[f64]) {
        debug_assert!(
            self.last_bar.is_none_or(|last| last < index),
            "bar index must strictly increase: last={}, got={index}",
            self.last_bar.unwrap_or(0),
        );
        self.last_bar = Some(index);

        if self.valid_from_bar.is_none() {
            tracing::trace!(
                lookback = self.lookback_period,
                bar = index,
                "indicator produced its first value"
            );
            self.valid_from_bar = Some(index);
        }

        self.len += 1;

        for &value in values {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Number of leading bars for which no value is produced.
    #[inline]
    #[must_use]
    pub fn lookback_period(&self) -> usize {
        self.lookback_period
    }

    /// Number of values produced so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` until the first value has been produced.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the bar that produced the first value.
    #[inline]
    #[must_use]
    pub fn valid_from_bar(&self) -> Option<BarIndex> {
        self.valid_from_bar
    }

    /// Smallest value emitted so far.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        (self.len > 0).then_some(self.min)
    }

    /// Largest value emitted so far.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        (self.len > 0).then_some(self.max)
    }
}

/// Checks `value` against `[min, MAXIMUM_PERIOD]`.
pub(crate) fn check_period(name: &'static str, value: usize, min: usize) -> Result<usize> {
    if value < min {
        return Err(IndicatorError::PeriodTooSmall { name, min, value });
    }

    if value > MAXIMUM_PERIOD {
        return Err(IndicatorError::PeriodTooLarge {
            name,
            max: MAXIMUM_PERIOD,
            value,
        });
    }

    Ok(value)
}

/// Unwraps a builder field, reporting it by name when unset.
pub(crate) fn require(name: &'static str, value: Option<usize>) -> Result<usize> {
    value.ok_or(IndicatorError::MissingParameter(name))
}

/// Logs a rejected configuration on its way out of a builder.
pub(crate) fn rejected<T>(config: &'static str, result: Result<T>) -> Result<T> {
    if let Err(error) = &result {
        tracing::debug!(config, %error, "rejected indicator configuration");
    }
    result
}
