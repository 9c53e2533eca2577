use std::fmt::Display;

use crate::{
    BarIndex, Indicator, IndicatorState, Ohlcv, Price, TickIndicator, config::source_config,
    history_window::HistoryWindow,
};

source_config! {
    /// Configuration for [`RocR`] and [`RocR100`].
    ///
    /// Period must lie in `[1, 100000]`. Default: 10 bars on close.
    RocConfig, RocConfigBuilder,
    min = 1,
    default = 10,
    lookback = |period| period,
}

/// Ratio of the current price to the price `period` bars earlier.
#[derive(Clone, Debug)]
struct RateOfChange {
    state: IndicatorState,
    window: HistoryWindow,
    scale: f64,
    current: Option<Price>,
}

impl RateOfChange {
    fn new(config: RocConfig, scale: f64) -> Self {
        Self {
            state: IndicatorState::new(config.period),
            window: HistoryWindow::new(config.period + 1),
            scale,
            current: None,
        }
    }

    fn push(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        self.window.push(value);

        if !self.window.is_full() {
            return None;
        }

        let previous = self.window.oldest()?;
        let ratio = if previous == 0.0 {
            0.0
        } else {
            self.scale * value / previous
        };

        self.state.record(index, &[ratio]);
        self.current = Some(ratio);

        self.current
    }
}

macro_rules! rate_of_change {
    ($(#[$meta:meta])* $name:ident, scale = $scale:expr, display = $display:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            config: RocConfig,
            inner: RateOfChange,
        }

        impl Indicator for $name {
            type Config = RocConfig;
            type Output = Price;

            fn new(config: Self::Config) -> Self {
                Self {
                    config,
                    inner: RateOfChange::new(config, $scale),
                }
            }

            #[inline]
            fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
                self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
            }

            #[inline]
            fn value(&self) -> Option<Price> {
                self.inner.current
            }

            #[inline]
            fn state(&self) -> &IndicatorState {
                &self.inner.state
            }
        }

        impl TickIndicator for $name {
            #[inline]
            fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Price> {
                self.inner.push(value, index)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    concat!($display, "({}, {})"),
                    self.config.period,
                    self.config.source
                )
            }
        }
    };
}

rate_of_change! {
    /// Rate of Change Ratio: `price / price[period bars ago]`.
    ///
    /// Returns 0 when the earlier price is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use tickflow_ta::{Bar, RocConfig, RocR};
    ///
    /// let mut roc = RocR::new(RocConfig::close(2)?);
    /// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
    ///
    /// roc.compute(&bar(10.0, 1));
    /// roc.compute(&bar(11.0, 2));
    /// assert_eq!(roc.compute(&bar(12.5, 3)), Some(1.25));
    /// # Ok::<(), tickflow_ta::IndicatorError>(())
    /// ```
    RocR, scale = 1.0, display = "ROCR"
}

rate_of_change! {
    /// Rate of Change Ratio ×100: `100 × price / price[period bars ago]`.
    ///
    /// Returns 0 when the earlier price is 0.
    RocR100, scale = 100.0, display = "ROCR100"
}
