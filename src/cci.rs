use std::fmt::Display;

use crate::{
    Indicator, IndicatorState, Ohlcv, Price, Sma, config::period_config,
    history_window::HistoryWindow, price_source::typical_price,
};

/// Lambert's scaling constant.
const FACTOR: f64 = 0.015;

period_config! {
    /// Configuration for the Commodity Channel Index ([`Cci`]).
    ///
    /// Period must lie in `[2, 100000]`. Default: 14.
    CciConfig, CciConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| period - 1,
}

/// Commodity Channel Index (CCI).
///
/// Distance of the typical price `(high + low + close) / 3` from its SMA,
/// in units of mean absolute deviation:
///
/// ```text
/// CCI = (tp − SMA(tp)) / (0.015 × mean(|tp_i − SMA(tp)|))
/// ```
///
/// The mean deviation is recomputed over the whole window each bar, so an
/// update is O(period). A window of identical typical prices yields 0.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Cci, CciConfig};
///
/// let mut cci = Cci::new(CciConfig::new(3)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// cci.compute(&bar(1.0, 1));
/// cci.compute(&bar(2.0, 2));
/// // SMA = 2, mean deviation = 2/3 → (3 − 2) / 0.01 = 100
/// let value = cci.compute(&bar(3.0, 3)).unwrap();
/// assert!((value - 100.0).abs() < 1e-9);
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Cci {
    config: CciConfig,
    state: IndicatorState,
    average: Sma,
    typical_prices: HistoryWindow,
    period_reciprocal: f64,
    current: Option<Price>,
}

impl Indicator for Cci {
    type Config = CciConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period - 1),
            average: Sma::with_period(config.period),
            typical_prices: HistoryWindow::new(config.period),
            #[allow(clippy::cast_precision_loss)]
            period_reciprocal: 1.0 / config.period as f64,
            current: None,
        }
    }

    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let typical = typical_price(ohlcv);
        self.typical_prices.push(typical);

        let sma = self.average.compute_tick(typical, ohlcv.index())?;

        let mean_deviation = self
            .typical_prices
            .iter()
            .map(|tp| (tp - sma).abs())
            .sum::<f64>()
            * self.period_reciprocal;

        let denominator = FACTOR * mean_deviation;
        let cci = if denominator == 0.0 {
            0.0
        } else {
            (typical - sma) / denominator
        };

        self.state.record(ohlcv.index(), &[cci]);
        self.current = Some(cci);

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

impl Display for Cci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CCI({})", self.config.period)
    }
}
