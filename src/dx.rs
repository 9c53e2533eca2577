use std::fmt::Display;

use crate::{Indicator, IndicatorState, MinusDi, Ohlcv, PlusDi, Price, config::period_config};

period_config! {
    /// Configuration for the Directional Movement Index ([`Dx`]).
    ///
    /// Period must lie in `[2, 100000]`. Default: 14.
    ///
    /// # Example
    ///
    /// ```
    /// use tickflow_ta::{DxConfig, IndicatorConfig};
    ///
    /// let config = DxConfig::new(14)?;
    /// assert_eq!(config.lookback_period(), 14);
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    DxConfig, DxConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| period,
}

/// Directional Movement Index (DX).
///
/// Normalised spread between the two directional indicators:
///
/// ```text
/// DX = 100 × |+DI − −DI| / (+DI + −DI)        (0 when both are 0)
/// ```
///
/// −DI is updated first on every bar; DX is produced when +DI reports.
#[derive(Clone, Debug)]
pub struct Dx {
    config: DxConfig,
    state: IndicatorState,
    minus_di: MinusDi,
    plus_di: PlusDi,
    current: Option<Price>,
}

impl Dx {
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(DxConfig { period })
    }
}

impl Indicator for Dx {
    type Config = DxConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            minus_di: MinusDi::with_period(config.period),
            plus_di: PlusDi::with_period(config.period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let minus = self.minus_di.compute(ohlcv);
        let plus = self.plus_di.compute(ohlcv)?;
        let minus = minus?;

        let sum = plus + minus;
        let dx = if sum == 0.0 {
            0.0
        } else {
            100.0 * (plus - minus).abs() / sum
        };

        self.state.record(ohlcv.index(), &[dx]);
        self.current = Some(dx);

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

impl Display for Dx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DX({})", self.config.period)
    }
}
