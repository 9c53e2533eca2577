use std::fmt::Display;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorState, Ohlcv, Price,
    error::Result,
};

/// Configuration for the [`TrueRange`] indicator.
///
/// True Range has no parameters; the config exists so that it composes with
/// the rest of the indicator API.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrueRangeConfig;

impl IndicatorConfig for TrueRangeConfig {
    type Builder = TrueRangeConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        TrueRangeConfigBuilder
    }

    #[inline]
    fn lookback_period(&self) -> usize {
        1
    }
}

impl Display for TrueRangeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrueRangeConfig")
    }
}

/// Builder for [`TrueRangeConfig`]. Building always succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrueRangeConfigBuilder;

impl IndicatorConfigBuilder<TrueRangeConfig> for TrueRangeConfigBuilder {
    fn build(self) -> Result<TrueRangeConfig> {
        Ok(TrueRangeConfig)
    }
}

/// True Range (TR).
///
/// The bar's range extended to cover a gap from the previous close:
///
/// ```text
/// TR = max(high, prev_close) − min(low, prev_close)
/// ```
///
/// The first bar has no previous close and yields `None`.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, TrueRange, TrueRangeConfig};
///
/// let mut tr = TrueRange::new(TrueRangeConfig);
///
/// assert_eq!(tr.compute(&Bar::new(10.0, 15.0, 5.0, 10.0, 0.0).at(1)), None);
/// // Gap up: max(30, 10) − min(20, 10) = 20
/// assert_eq!(tr.compute(&Bar::new(25.0, 30.0, 20.0, 28.0, 0.0).at(2)), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct TrueRange {
    state: IndicatorState,
    prev_close: Option<Price>,
    current: Option<Price>,
}

impl Indicator for TrueRange {
    type Config = TrueRangeConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            state: IndicatorState::new(config.lookback_period()),
            prev_close: None,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let prev_close = self.prev_close.replace(ohlcv.close())?;

        let tr = ohlcv.high().max(prev_close) - ohlcv.low().min(prev_close);
        self.state.record(ohlcv.index(), &[tr]);
        self.current = Some(tr);

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

impl Default for TrueRange {
    fn default() -> Self {
        <Self as Indicator>::new(TrueRangeConfig)
    }
}

impl Display for TrueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TR")
    }
}
