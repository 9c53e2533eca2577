use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
};

use crate::{
    Indicator, IndicatorState, Ohlcv, Price, TrueRange, config::period_config, wilder::WilderSum,
};

mod sealed {
    pub trait Sealed {}
}

/// Side of the market a directional indicator measures.
///
/// Implemented by [`Plus`] (upward movement) and [`Minus`] (downward
/// movement); sealed.
pub trait Direction: sealed::Sealed + Clone + Copy + Debug + Default + Send + Sync {
    /// Sign used in display names.
    const SIGN: char;

    /// Movement credited to this side given the bar's upward move
    /// (`high − prev_high`) and downward move (`prev_low − low`).
    ///
    /// Non-zero only when this side's move is positive and strictly larger
    /// than the opposite one.
    fn movement(up: Price, down: Price) -> Price;
}

/// Upward directional movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plus;

/// Downward directional movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Minus;

impl sealed::Sealed for Plus {}
impl sealed::Sealed for Minus {}

impl Direction for Plus {
    const SIGN: char = '+';

    #[inline]
    fn movement(up: Price, down: Price) -> Price {
        if up > 0.0 && up > down { up } else { 0.0 }
    }
}

impl Direction for Minus {
    const SIGN: char = '-';

    #[inline]
    fn movement(up: Price, down: Price) -> Price {
        if down > 0.0 && down > up { down } else { 0.0 }
    }
}

period_config! {
    /// Configuration for [`PlusDm`] and [`MinusDm`].
    ///
    /// Period must lie in `[1, 100000]`. Default: 14.
    DmConfig, DmConfigBuilder,
    min = 1,
    default = 14,
    lookback = |period| period,
}

period_config! {
    /// Configuration for [`PlusDi`] and [`MinusDi`].
    ///
    /// Period must lie in `[1, 100000]`. Default: 14.
    DiConfig, DiConfigBuilder,
    min = 1,
    default = 14,
    lookback = |period| period,
}

/// Directional Movement (+DM / −DM), Wilder-smoothed.
///
/// Per bar, the upward move `high − prev_high` and downward move
/// `prev_low − low` are compared; only the larger one (if positive) counts
/// for its side. With period 1 the raw movement is emitted from the second
/// bar. With a longer period the first `period − 1` movements are summed and
/// from bar `period + 1` on the running sum is smoothed with
/// `s = s − s/period + dm`.
///
/// # Example
///
/// ```
/// use tickflow_ta::{Bar, DmConfig, PlusDm};
///
/// let mut dm = PlusDm::new(DmConfig::new(1)?);
///
/// assert_eq!(dm.compute(&Bar::new(0.0, 10.0, 8.0, 9.0, 0.0).at(1)), None);
/// // up = 2, down = −1
/// assert_eq!(dm.compute(&Bar::new(0.0, 12.0, 9.0, 11.0, 0.0).at(2)), Some(2.0));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DirectionalMovement<D: Direction> {
    config: DmConfig,
    state: IndicatorState,
    prev: Option<(Price, Price)>,
    smoothed: WilderSum,
    current: Option<Price>,
    direction: PhantomData<D>,
}

/// Plus Directional Movement (+DM).
pub type PlusDm = DirectionalMovement<Plus>;

/// Minus Directional Movement (−DM).
pub type MinusDm = DirectionalMovement<Minus>;

impl<D: Direction> Indicator for DirectionalMovement<D> {
    type Config = DmConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            prev: None,
            smoothed: WilderSum::new(config.period),
            current: None,
            direction: PhantomData,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let (prev_high, prev_low) = self.prev.replace((ohlcv.high(), ohlcv.low()))?;

        let dm = D::movement(ohlcv.high() - prev_high, prev_low - ohlcv.low());
        let smoothed = self.smoothed.push(dm)?;

        self.state.record(ohlcv.index(), &[smoothed]);
        self.current = Some(smoothed);

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

impl<D: Direction> Display for DirectionalMovement<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}DM({})", D::SIGN, self.config.period)
    }
}

/// Directional Indicator (+DI / −DI).
///
/// Ratio of smoothed directional movement to smoothed true range, scaled to
/// percent:
///
/// ```text
/// DI = 100 × sDM / sTR        (0 when sTR == 0)
/// ```
///
/// Both series use the same Wilder running sum as [`DirectionalMovement`].
/// With period 1 the raw ratio `dm / tr` is returned unscaled.
///
/// Each instance owns its own [`TrueRange`], fed exactly once per bar.
#[derive(Clone, Debug)]
pub struct DirectionalIndicator<D: Direction> {
    config: DiConfig,
    state: IndicatorState,
    movement: DirectionalMovement<D>,
    true_range: TrueRange,
    smoothed_tr: WilderSum,
    scale: f64,
    current: Option<Price>,
}

/// Plus Directional Indicator (+DI).
pub type PlusDi = DirectionalIndicator<Plus>;

/// Minus Directional Indicator (−DI).
pub type MinusDi = DirectionalIndicator<Minus>;

impl<D: Direction> DirectionalIndicator<D> {
    /// DI without period validation. DX and ADX construct theirs from an
    /// already validated period.
    pub(crate) fn with_period(period: usize) -> Self {
        <Self as Indicator>::new(DiConfig { period })
    }
}

impl<D: Direction> Indicator for DirectionalIndicator<D> {
    type Config = DiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            state: IndicatorState::new(config.period),
            movement: <DirectionalMovement<D> as Indicator>::new(DmConfig {
                period: config.period,
            }),
            true_range: TrueRange::default(),
            smoothed_tr: WilderSum::new(config.period),
            scale: if config.period == 1 { 1.0 } else { 100.0 },
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let smoothed_tr = self
            .true_range
            .compute(ohlcv)
            .and_then(|tr| self.smoothed_tr.push(tr));
        let smoothed_dm = self.movement.compute(ohlcv)?;
        let smoothed_tr = smoothed_tr?;

        let di = if smoothed_tr == 0.0 {
            0.0
        } else {
            self.scale * smoothed_dm / smoothed_tr
        };

        self.state.record(ohlcv.index(), &[di]);
        self.current = Some(di);

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

impl<D: Direction> Display for DirectionalIndicator<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}DI({})", D::SIGN, self.config.period)
    }
}
