//! Streaming technical analysis indicators for Rust.
//!
//! Indicators accept any type implementing [`Ohlcv`] one bar at a time and
//! return typed results. Values are `None` until the indicator has seen
//! [`lookback_period`](Indicator::lookback_period) bars; from then on every
//! bar produces exactly one value.
//!
//! Composite indicators own the indicators they are built from: [`Adx`] owns
//! a [`Dx`], which owns a [`PlusDi`] and a [`MinusDi`], each of which owns its
//! own [`TrueRange`]. Nothing is shared, so every indicator is a plain value
//! that can be cloned, moved across threads or dropped at will.
//!
//! Each indicator type exposes [`new`](Sma::new), [`compute`](Sma::compute)
//! and [`value`](Sma::value) as inherent methods, plus
//! [`compute_tick`](Sma::compute_tick) on indicators that run on a single
//! scalar series. No trait import needed. Import [`Indicator`] for generic
//! code or for [`lookback_period`](Indicator::lookback_period) and
//! [`len`](Indicator::len).
//!
//! Results can be read from the return value, collected in a [`Series`],
//! pushed to a callback through a [`Notifier`], or fanned out from a single
//! bar source with a [`BarStream`].
//!
//! ```
//! use tickflow_ta::{Bar, Macd, MacdConfig, Rsi, RsiConfig};
//!
//! let mut rsi = Rsi::new(RsiConfig::close(14)?);
//! let mut macd = Macd::new(MacdConfig::default());
//!
//! for index in 1..=60 {
//!     let close = 100.0 + (index as f64 * 0.3).sin() * 5.0;
//!     let bar = Bar::new(close, close + 1.0, close - 1.0, close, 1_000.0).at(index);
//!     rsi.compute(&bar);
//!     macd.compute(&bar);
//! }
//!
//! assert!(rsi.value().is_some());
//! assert!(macd.value().is_some());
//! # Ok::<(), tickflow_ta::IndicatorError>(())
//! ```

mod adx;
mod adxr;
mod aroon;
mod atr;
mod cci;
mod config;
mod directional;
mod dx;
mod ema;
mod error;
mod extremum;
mod history_window;
mod indicator;
mod macd;
mod ohlcv;
mod price_source;
mod roc;
mod rsi;
mod series;
mod sma;
mod stoch;
mod stream;
mod true_range;
mod wilder;
mod wma;

pub use crate::error::{IndicatorError, Result};
pub use crate::indicator::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorState, MAXIMUM_PERIOD,
    TickIndicator,
};
pub use crate::ohlcv::{Bar, BarIndex, Ohlcv, Price};
pub use crate::price_source::PriceSource;
pub use crate::series::{Notifier, NotifierBuilder, Series};
pub use crate::stream::{BarStream, BarSubscriber, Subscription};

pub use crate::adx::{Adx, AdxConfig, AdxConfigBuilder};
pub use crate::adxr::{Adxr, AdxrConfig, AdxrConfigBuilder};
pub use crate::aroon::{Aroon, AroonConfig, AroonConfigBuilder, AroonOsc, AroonValue};
pub use crate::atr::{Atr, AtrConfig, AtrConfigBuilder};
pub use crate::cci::{Cci, CciConfig, CciConfigBuilder};
pub use crate::directional::{
    DiConfig, DiConfigBuilder, Direction, DirectionalIndicator, DirectionalMovement, DmConfig,
    DmConfigBuilder, Minus, MinusDi, MinusDm, Plus, PlusDi, PlusDm,
};
pub use crate::dx::{Dx, DxConfig, DxConfigBuilder};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::extremum::{
    Extreme, Extremum, ExtremumBars, ExtremumBarsConfig, ExtremumBarsConfigBuilder,
    ExtremumConfig, ExtremumConfigBuilder, Hhv, HhvBars, Highest, Llv, LlvBars, Lowest,
};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue};
pub use crate::roc::{RocConfig, RocConfigBuilder, RocR, RocR100};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};
pub use crate::stoch::{
    Stoch, StochConfig, StochConfigBuilder, StochRsi, StochRsiConfig, StochRsiConfigBuilder,
    StochValue,
};
pub use crate::true_range::{TrueRange, TrueRangeConfig, TrueRangeConfigBuilder};
pub use crate::wma::{Wma, WmaConfig, WmaConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, ohlcv)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
    ($type:ty, $config:ty, $output:ty, tick) => {
        impl_indicator_methods!($type, $config, $output);

        impl $type {
            /// See [`TickIndicator::compute_tick`].
            #[inline]
            pub fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<$output> {
                <Self as TickIndicator>::compute_tick(self, value, index)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price, tick);
impl_indicator_methods!(Ema, EmaConfig, Price, tick);
impl_indicator_methods!(Wma, WmaConfig, Price, tick);
impl_indicator_methods!(Rsi, RsiConfig, Price, tick);
impl_indicator_methods!(Macd, MacdConfig, MacdValue, tick);
impl_indicator_methods!(StochRsi, StochRsiConfig, StochValue, tick);
impl_indicator_methods!(Llv, ExtremumConfig, Price, tick);
impl_indicator_methods!(Hhv, ExtremumConfig, Price, tick);
impl_indicator_methods!(LlvBars, ExtremumBarsConfig, usize, tick);
impl_indicator_methods!(HhvBars, ExtremumBarsConfig, usize, tick);
impl_indicator_methods!(RocR, RocConfig, Price, tick);
impl_indicator_methods!(RocR100, RocConfig, Price, tick);
impl_indicator_methods!(TrueRange, TrueRangeConfig, Price);
impl_indicator_methods!(PlusDm, DmConfig, Price);
impl_indicator_methods!(MinusDm, DmConfig, Price);
impl_indicator_methods!(PlusDi, DiConfig, Price);
impl_indicator_methods!(MinusDi, DiConfig, Price);
impl_indicator_methods!(Dx, DxConfig, Price);
impl_indicator_methods!(Adx, AdxConfig, Price);
impl_indicator_methods!(Adxr, AdxrConfig, Price);
impl_indicator_methods!(Cci, CciConfig, Price);
impl_indicator_methods!(Aroon, AroonConfig, AroonValue);
impl_indicator_methods!(AroonOsc, AroonConfig, Price);
impl_indicator_methods!(Atr, AtrConfig, Price);
impl_indicator_methods!(Stoch, StochConfig, StochValue);

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod inherent_methods {
    use super::{
        Adx, AdxConfig, Aroon, AroonConfig, Bar, DiConfig, Macd, MacdConfig, MacdValue, MinusDi,
        Sma, SmaConfig,
    };

    fn bar(close: f64, index: u64) -> Bar {
        Bar::new(close, close + 1.0, close - 1.0, close, 0.0).at(index)
    }

    #[test]
    fn sma_without_indicator_import() {
        let mut sma = Sma::new(SmaConfig::close(2).unwrap());
        assert_eq!(sma.compute(&bar(10.0, 1)), None);
        assert_eq!(sma.compute(&bar(20.0, 2)), Some(15.0));
        assert_eq!(sma.compute_tick(40.0, 3), Some(30.0));
        assert_eq!(sma.value(), Some(30.0));
    }

    #[test]
    fn macd_without_indicator_import() {
        let mut macd = Macd::new(MacdConfig::close(2, 3, 1).unwrap());
        for index in 1..=3 {
            macd.compute(&bar(index as f64, index));
        }
        let v: Option<MacdValue> = macd.value();
        assert!(v.is_some());
    }

    #[test]
    fn aliases_without_indicator_import() {
        let mut minus_di = MinusDi::new(DiConfig::new(1).unwrap());
        assert_eq!(minus_di.compute(&bar(10.0, 1)), None);
        assert!(minus_di.compute(&bar(9.0, 2)).is_some());
    }

    #[test]
    fn composites_without_indicator_import() {
        let mut adx = Adx::new(AdxConfig::new(2).unwrap());
        let mut aroon = Aroon::new(AroonConfig::new(2).unwrap());
        for index in 1..=4 {
            adx.compute(&bar(index as f64, index));
            aroon.compute(&bar(index as f64, index));
        }
        assert!(adx.value().is_some());
        assert!(aroon.value().is_some());
    }
}
