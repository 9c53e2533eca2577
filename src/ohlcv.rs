/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Sequence number of a bar within its stream.
///
/// Assigned by the producing stream, starting at 1 and strictly increasing
/// between consecutive calls to [`Indicator::compute`](crate::Indicator::compute).
pub type BarIndex = u64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-tick
/// conversion. Indicators accept `&impl Ohlcv` and extract the
/// configured [`PriceSource`](crate::PriceSource) internally.
///
/// # Example
///
/// ```
/// use tickflow_ta::{BarIndex, Ohlcv, Price};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64, v: f64,
///     seq: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> f64 { self.v }
///     fn index(&self) -> BarIndex { self.seq }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Trade volume during the bar. Defaults to `0.0`.
    ///
    /// Indicators that don't use volume ignore this value.
    fn volume(&self) -> f64 {
        0.0
    }

    /// Sequence index of the bar.
    ///
    /// Must strictly increase between calls. Indicators record it as the bar
    /// from which their output becomes valid but never reorder on it.
    fn index(&self) -> BarIndex;
}

/// An immutable OHLCV sample.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, Ohlcv};
///
/// let bar = Bar::new(10.0, 12.0, 9.5, 11.0, 1_500.0).at(1);
/// assert_eq!(bar.index(), 1);
/// assert_eq!(bar.close(), 11.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: f64,
    index: BarIndex,
}

impl Bar {
    /// Creates a bar with index `0`. Use [`at`](Self::at) to place it in a
    /// stream.
    #[must_use]
    pub fn new(open: Price, high: Price, low: Price, close: Price, volume: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            index: 0,
        }
    }

    /// Returns the same bar with the given sequence index.
    #[must_use]
    pub fn at(mut self, index: BarIndex) -> Self {
        self.index = index;
        self
    }
}

impl Ohlcv for Bar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn volume(&self) -> f64 {
        self.volume
    }

    #[inline]
    fn index(&self) -> BarIndex {
        self.index
    }
}
