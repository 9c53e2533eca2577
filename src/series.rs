//! Output sinks that sit between an indicator and its consumer.
//!
//! [`Series`] keeps every result in a growable buffer. [`Notifier`] keeps
//! nothing and hands each result to a callback as soon as it is produced.

use std::fmt::Debug;

use crate::{
    BarIndex, Indicator, IndicatorError, Ohlcv, Price, TickIndicator, error::Result,
};

/// An indicator together with every result it has produced.
///
/// The buffer holds exactly one entry per valid bar, so after `n` bars it
/// contains `max(0, n − lookback)` values.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Macd, MacdConfig, MacdValue, Series};
///
/// let mut series = Series::new(Macd::new(MacdConfig::close(2, 3, 2)?));
/// for (close, index) in [10.0, 11.0, 12.0, 11.5, 13.0].into_iter().zip(1..) {
///     series.compute(&Bar::new(close, close, close, close, 0.0).at(index));
/// }
///
/// assert_eq!(series.data().len(), 2);
/// let signal: Vec<f64> = series.channel(MacdValue::signal).collect();
/// assert_eq!(signal.len(), 2);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Series<I: Indicator> {
    indicator: I,
    data: Vec<I::Output>,
}

impl<I: Indicator> Series<I> {
    /// Wraps `indicator` with an empty buffer.
    #[must_use]
    pub fn new(indicator: I) -> Self {
        Self {
            indicator,
            data: Vec::new(),
        }
    }

    /// Wraps `indicator` with a buffer sized for a source of `source_len`
    /// bars.
    #[must_use]
    pub fn with_source_len(indicator: I, source_len: usize) -> Self {
        let capacity = source_len.saturating_sub(indicator.lookback_period());
        Self {
            indicator,
            data: Vec::with_capacity(capacity),
        }
    }

    /// Feeds one bar and stores the result, if any.
    pub fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<I::Output> {
        let value = self.indicator.compute(ohlcv)?;
        self.data.push(value);
        Some(value)
    }

    /// Results so far, oldest first.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[I::Output] {
        &self.data
    }

    /// Projects one component of every stored result.
    pub fn channel<'s, T>(
        &'s self,
        select: impl Fn(&I::Output) -> T + 's,
    ) -> impl Iterator<Item = T> + 's {
        self.data.iter().map(select)
    }

    /// The wrapped indicator.
    #[inline]
    #[must_use]
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Unwraps into the indicator and its buffer.
    #[must_use]
    pub fn into_parts(self) -> (I, Vec<I::Output>) {
        (self.indicator, self.data)
    }
}

impl<I: TickIndicator> Series<I> {
    /// Feeds one scalar and stores the result, if any.
    pub fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<I::Output> {
        let value = self.indicator.compute_tick(value, index)?;
        self.data.push(value);
        Some(value)
    }
}

type ValueAction<'a, T> = Box<dyn FnMut(T, BarIndex) + 'a>;

/// An indicator that reports each result through a callback instead of
/// storing it.
///
/// Built with [`Notifier::builder`]; building without
/// [`on_value`](NotifierBuilder::on_value) fails.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Notifier, Sma, SmaConfig};
///
/// let mut seen = Vec::new();
/// {
///     let mut notifier = Notifier::builder(Sma::new(SmaConfig::close(2)?))
///         .on_value(|value, index| seen.push((index, value)))
///         .build()?;
///     for (close, index) in [1.0, 3.0, 5.0].into_iter().zip(1..) {
///         notifier.compute(&Bar::new(close, close, close, close, 0.0).at(index));
///     }
/// }
/// assert_eq!(seen, vec![(2, 2.0), (3, 4.0)]);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
pub struct Notifier<'a, I: Indicator> {
    indicator: I,
    on_value: ValueAction<'a, I::Output>,
}

impl<'a, I: Indicator> Notifier<'a, I> {
    /// Starts building a notifier around `indicator`.
    #[must_use]
    pub fn builder(indicator: I) -> NotifierBuilder<'a, I> {
        NotifierBuilder {
            indicator,
            on_value: None,
        }
    }

    /// Feeds one bar and invokes the callback with the result, if any.
    pub fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<I::Output> {
        let value = self.indicator.compute(ohlcv)?;
        (self.on_value)(value, ohlcv.index());
        Some(value)
    }

    /// The wrapped indicator.
    #[inline]
    #[must_use]
    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

impl<I: TickIndicator> Notifier<'_, I> {
    /// Feeds one scalar and invokes the callback with the result, if any.
    pub fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<I::Output> {
        let value = self.indicator.compute_tick(value, index)?;
        (self.on_value)(value, index);
        Some(value)
    }
}

impl<I: Indicator> Debug for Notifier<'_, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Notifier))
            .field("indicator", &self.indicator)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Notifier`].
pub struct NotifierBuilder<'a, I: Indicator> {
    indicator: I,
    on_value: Option<ValueAction<'a, I::Output>>,
}

impl<'a, I: Indicator> NotifierBuilder<'a, I> {
    /// Sets the callback invoked with `(value, bar_index)` for every result.
    #[must_use]
    pub fn on_value(mut self, action: impl FnMut(I::Output, BarIndex) + 'a) -> Self {
        self.on_value = Some(Box::new(action));
        self
    }

    /// Builds the notifier.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::MissingValueAction`] if no callback was set.
    pub fn build(self) -> Result<Notifier<'a, I>> {
        let Some(on_value) = self.on_value else {
            tracing::debug!(indicator = %self.indicator, "notifier built without a value action");
            return Err(IndicatorError::MissingValueAction);
        };

        Ok(Notifier {
            indicator: self.indicator,
            on_value,
        })
    }
}

impl<I: Indicator> Debug for NotifierBuilder<'_, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(NotifierBuilder))
            .field("indicator", &self.indicator)
            .field("has_on_value", &self.on_value.is_some())
            .finish()
    }
}
