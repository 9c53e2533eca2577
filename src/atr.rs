use std::fmt::Display;

use crate::{
    Indicator, IndicatorState, Ohlcv, Price, TrueRange, config::period_config,
    wilder::WilderAverage,
};

period_config! {
    /// Configuration for the Average True Range ([`Atr`]).
    ///
    /// Period must lie in `[1, 100000]`. Default: 14.
    AtrConfig, AtrConfigBuilder,
    min = 1,
    default = 14,
    lookback = |period| period,
}

/// Average True Range (ATR).
///
/// Wilder-smoothed [`TrueRange`]. The first value is the mean of the first
/// `period` true ranges; after that:
///
/// ```text
/// ATR = (prev_ATR × (period − 1) + TR) / period
/// ```
///
/// # Example
///
/// ```
/// use tickflow_ta::{Atr, AtrConfig, Bar};
///
/// let mut atr = Atr::new(AtrConfig::new(2)?);
/// let bar = |high, low, close, index| Bar::new(close, high, low, close, 0.0).at(index);
///
/// assert_eq!(atr.compute(&bar(10.0, 8.0, 9.0, 1)), None);
/// assert_eq!(atr.compute(&bar(11.0, 9.0, 10.0, 2)), None); // TR 2
/// assert_eq!(atr.compute(&bar(14.0, 10.0, 13.0, 3)), Some(3.0)); // TR 4
/// // (3 × 1 + 1) / 2
/// assert_eq!(atr.compute(&bar(13.5, 12.5, 13.0, 4)), Some(2.0)); // TR 1
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Atr {
    config: AtrConfig,
    state: IndicatorState,
    true_range: TrueRange,
    average: WilderAverage,
    current: Option<Price>,
}

impl Indicator for Atr {
    type Config = AtrConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            true_range: TrueRange::default(),
            average: WilderAverage::new(config.period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let tr = self.true_range.compute(ohlcv)?;
        let atr = self.average.push(tr, ohlcv.index())?;

        self.state.record(ohlcv.index(), &[atr]);
        self.current = Some(atr);

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

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({})", self.config.period)
    }
}
