use std::fmt::Display;

use crate::{
    Dx, Indicator, IndicatorState, Ohlcv, Price, config::period_config, wilder::WilderAverage,
};

period_config! {
    /// Configuration for the Average Directional Movement Index ([`Adx`]).
    ///
    /// Period must lie in `[2, 100000]`. Default: 14.
    ///
    /// # Example
    ///
    /// ```
    /// use tickflow_ta::{AdxConfig, IndicatorConfig};
    ///
    /// let config = AdxConfig::new(14)?;
    /// assert_eq!(config.lookback_period(), 27);
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    AdxConfig, AdxConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| 2 * period - 1,
}

/// Average Directional Movement Index (ADX).
///
/// Trend strength on a 0–100 scale, regardless of direction. The first value
/// is the mean of the first `period` [`Dx`] values; after that DX is smoothed
/// with Wilder's recurrence:
///
/// ```text
/// ADX = (prev_ADX × (period − 1) + DX) / period
/// ```
///
/// # Example
///
/// ```
/// use tickflow_ta::{Adx, AdxConfig, Bar};
///
/// let mut adx = Adx::new(AdxConfig::new(3)?);
///
/// let mut produced = 0;
/// for index in 1..=10 {
///     let base = index as f64;
///     if adx.compute(&Bar::new(base, base + 1.0, base - 1.0, base, 0.0).at(index)).is_some() {
///         produced += 1;
///     }
/// }
/// // lookback = 2 × 3 − 1 = 5
/// assert_eq!(produced, 5);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Adx {
    config: AdxConfig,
    state: IndicatorState,
    dx: Dx,
    average: WilderAverage,
    current: Option<Price>,
}

impl Adx {
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(AdxConfig { period })
    }
}

impl Indicator for Adx {
    type Config = AdxConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(2 * config.period - 1),
            dx: Dx::with_period(config.period),
            average: WilderAverage::new(config.period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let dx = self.dx.compute(ohlcv)?;
        let adx = self.average.push(dx, ohlcv.index())?;

        self.state.record(ohlcv.index(), &[adx]);
        self.current = Some(adx);

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

impl Display for Adx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ADX({})", self.config.period)
    }
}
