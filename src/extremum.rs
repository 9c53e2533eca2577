use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
};

use crate::{
    BarIndex, Indicator, IndicatorState, Ohlcv, Price, TickIndicator, config::source_config,
    history_window::HistoryWindow,
};

mod sealed {
    pub trait Sealed {}
}

/// Which end of the window an extremum indicator tracks.
///
/// Implemented by [`Lowest`] and [`Highest`]; sealed.
pub trait Extreme: sealed::Sealed + Clone + Copy + Debug + Default + Send + Sync {
    /// Display name prefix.
    const NAME: &'static str;

    /// `true` for the lowest value, `false` for the highest.
    const LOWEST: bool;
}

/// Lowest value in the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Lowest;

/// Highest value in the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Highest;

impl sealed::Sealed for Lowest {}
impl sealed::Sealed for Highest {}

impl Extreme for Lowest {
    const NAME: &'static str = "LLV";
    const LOWEST: bool = true;
}

impl Extreme for Highest {
    const NAME: &'static str = "HHV";
    const LOWEST: bool = false;
}

source_config! {
    /// Configuration for [`Llv`] and [`Hhv`].
    ///
    /// Period must lie in `[2, 100000]`. Default: 14 bars on close.
    ExtremumConfig, ExtremumConfigBuilder,
    min = 2,
    default = 14,
    lookback = |period| period - 1,
}

source_config! {
    /// Configuration for [`LlvBars`] and [`HhvBars`].
    ///
    /// Period must lie in `[1, 100000]`. Default: 14 bars on close.
    ExtremumBarsConfig, ExtremumBarsConfigBuilder,
    min = 1,
    default = 14,
    lookback = |period| period - 1,
}

/// Lowest or highest value of the last `period` scalars.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, ExtremumConfig, Hhv};
///
/// let mut hhv = Hhv::new(ExtremumConfig::close(2)?);
/// let bar = |close, index| Bar::new(close, close, close, close, 0.0).at(index);
///
/// assert_eq!(hhv.compute(&bar(3.0, 1)), None);
/// assert_eq!(hhv.compute(&bar(5.0, 2)), Some(5.0));
/// assert_eq!(hhv.compute(&bar(4.0, 3)), Some(5.0));
/// assert_eq!(hhv.compute(&bar(2.0, 4)), Some(4.0));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Extremum<E: Extreme> {
    config: ExtremumConfig,
    state: IndicatorState,
    window: HistoryWindow,
    current: Option<Price>,
    side: PhantomData<E>,
}

/// Lowest Low Value.
pub type Llv = Extremum<Lowest>;

/// Highest High Value.
pub type Hhv = Extremum<Highest>;

impl<E: Extreme> Indicator for Extremum<E> {
    type Config = ExtremumConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period - 1),
            window: HistoryWindow::new(config.period),
            current: None,
            side: PhantomData,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
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

impl<E: Extreme> TickIndicator for Extremum<E> {
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        self.window.push(value);

        if !self.window.is_full() {
            return None;
        }

        let extreme = if E::LOWEST {
            self.window.min()?
        } else {
            self.window.max()?
        };

        self.state.record(index, &[extreme]);
        self.current = Some(extreme);

        self.current
    }
}

impl<E: Extreme> Display for Extremum<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, {})",
            E::NAME,
            self.config.period,
            self.config.source
        )
    }
}

/// Bars elapsed since the lowest or highest of the last `period` scalars.
///
/// 0 means the current bar holds the extreme. When the extreme occurs more
/// than once in the window, the oldest occurrence counts.
#[derive(Clone, Debug)]
pub struct ExtremumBars<E: Extreme> {
    config: ExtremumBarsConfig,
    state: IndicatorState,
    window: HistoryWindow,
    current: Option<usize>,
    side: PhantomData<E>,
}

/// Bars since the Lowest Low Value.
pub type LlvBars = ExtremumBars<Lowest>;

/// Bars since the Highest High Value.
pub type HhvBars = ExtremumBars<Highest>;

impl<E: Extreme> Indicator for ExtremumBars<E> {
    type Config = ExtremumBarsConfig;
    type Output = usize;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period - 1),
            window: HistoryWindow::new(config.period),
            current: None,
            side: PhantomData,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<usize> {
        self.compute_tick(self.config.source.extract(ohlcv), ohlcv.index())
    }

    #[inline]
    fn value(&self) -> Option<usize> {
        self.current
    }

    #[inline]
    fn state(&self) -> &IndicatorState {
        &self.state
    }
}

impl<E: Extreme> TickIndicator for ExtremumBars<E> {
    fn compute_tick(&mut self, value: Price, index: BarIndex) -> Option<usize> {
        self.window.push(value);

        if !self.window.is_full() {
            return None;
        }

        let since = if E::LOWEST {
            self.window.bars_since_min(false)?
        } else {
            self.window.bars_since_max(false)?
        };

        #[allow(clippy::cast_precision_loss)]
        let recorded = since as f64;
        self.state.record(index, &[recorded]);
        self.current = Some(since);

        self.current
    }
}

impl<E: Extreme> Display for ExtremumBars<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}BARS({}, {})",
            E::NAME,
            self.config.period,
            self.config.source
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{PriceSource, test_util::feed_closes};

    const CLOSES: [f64; 8] = [5.0, 3.0, 4.0, 3.0, 6.0, 2.0, 2.0, 7.0];

    mod values {
        use super::*;

        #[test]
        fn llv_tracks_window_minimum() {
            let mut llv = Llv::new(ExtremumConfig::close(3).unwrap());
            let values = feed_closes!(llv, CLOSES);
            assert_eq!(
                values,
                vec![
                    None,
                    None,
                    Some(3.0),
                    Some(3.0),
                    Some(3.0),
                    Some(2.0),
                    Some(2.0),
                    Some(2.0)
                ]
            );
            assert_eq!(llv.len(), 6);
        }

        #[test]
        fn hhv_tracks_window_maximum() {
            let mut hhv = Hhv::new(ExtremumConfig::close(3).unwrap());
            let values = feed_closes!(hhv, CLOSES);
            assert_eq!(
                values[2..],
                [Some(5.0), Some(4.0), Some(6.0), Some(6.0), Some(6.0), Some(7.0)]
            );
        }

        #[test]
        fn reads_configured_source() {
            let mut llv = Llv::new(ExtremumConfig::with_source(2, PriceSource::Low).unwrap());
            llv.compute(&crate::Bar::new(5.0, 6.0, 1.0, 5.0, 0.0).at(1));
            let value = llv.compute(&crate::Bar::new(5.0, 6.0, 4.0, 5.0, 0.0).at(2));
            assert_eq!(value, Some(1.0));
        }

        #[test]
        fn period_one_is_rejected() {
            assert!(ExtremumConfig::close(1).is_err());
        }
    }

    mod bars {
        use super::*;

        #[test]
        fn llv_bars_counts_from_current_bar() {
            let mut llv_bars = LlvBars::new(ExtremumBarsConfig::close(3).unwrap());
            let values = feed_closes!(llv_bars, CLOSES);
            // windows: [5,3,4] [3,4,3] [4,3,6] [3,6,2] [6,2,2] [2,2,7]
            assert_eq!(
                values[2..],
                [Some(1), Some(2), Some(1), Some(0), Some(1), Some(2)]
            );
        }

        #[test]
        fn ties_resolve_to_oldest() {
            let mut hhv_bars = HhvBars::new(ExtremumBarsConfig::close(3).unwrap());
            let values = feed_closes!(hhv_bars, [4.0, 4.0, 4.0]);
            assert_eq!(values[2], Some(2));
        }

        #[test]
        fn period_one_is_always_zero() {
            let mut hhv_bars = HhvBars::new(ExtremumBarsConfig::close(1).unwrap());
            assert_eq!(hhv_bars.lookback_period(), 0);
            let values = feed_closes!(hhv_bars, [1.0, 9.0, 3.0]);
            assert_eq!(values, vec![Some(0), Some(0), Some(0)]);
        }

        #[test]
        fn state_records_counts() {
            let mut hhv_bars = HhvBars::new(ExtremumBarsConfig::close(2).unwrap());
            let _ = feed_closes!(hhv_bars, [3.0, 1.0, 2.0]);
            assert_eq!(hhv_bars.state().max(), Some(1.0));
            assert_eq!(hhv_bars.state().min(), Some(0.0));
        }
    }

    #[test]
    fn display() {
        let llv = Llv::new(ExtremumConfig::default());
        let hhv_bars = HhvBars::new(ExtremumBarsConfig::close(10).unwrap());
        assert_eq!(llv.to_string(), "LLV(14, Close)");
        assert_eq!(hhv_bars.to_string(), "HHVBARS(10, Close)");
    }
}
