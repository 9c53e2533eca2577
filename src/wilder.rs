//! Wilder's smoothing recurrences shared by the directional family and ATR.

use crate::{BarIndex, Price, Sma};

/// Wilder running sum: `s = s − s/n + x`.
///
/// The first `n − 1` inputs are summed plainly and produce nothing; every
/// later input applies the recurrence and returns the smoothed sum. With
/// `n == 1` the recurrence degenerates to passing `x` through.
#[derive(Clone, Debug)]
pub(crate) struct WilderSum {
    warmup: usize,
    period: f64,
    sum: f64,
}

impl WilderSum {
    pub(crate) fn new(period: usize) -> Self {
        Self {
            warmup: period - 1,
            #[allow(clippy::cast_precision_loss)]
            period: period as f64,
            sum: 0.0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Price) -> Option<Price> {
        if self.warmup > 0 {
            self.warmup -= 1;
            self.sum += value;
            return None;
        }

        self.sum = self.sum - self.sum / self.period + value;
        Some(self.sum)
    }
}

/// Wilder moving average: mean of the first `n` inputs, then
/// `avg = (avg × (n − 1) + x) / n`.
#[derive(Clone, Debug)]
pub(crate) struct WilderAverage {
    seed: Option<Sma>,
    period_minus_one: f64,
    period_reciprocal: f64,
    current: Option<Price>,
}

impl WilderAverage {
    pub(crate) fn new(period: usize) -> Self {
        Self {
            seed: Some(Sma::with_period(period)),
            #[allow(clippy::cast_precision_loss)]
            period_minus_one: (period - 1) as f64,
            #[allow(clippy::cast_precision_loss)]
            period_reciprocal: 1.0 / period as f64,
            current: None,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Price, index: BarIndex) -> Option<Price> {
        let average = match (self.seed.as_mut(), self.current) {
            (Some(seed), _) => {
                let mean = seed.compute_tick(value, index)?;
                self.seed = None;
                mean
            }
            (None, Some(previous)) => {
                previous.mul_add(self.period_minus_one, value) * self.period_reciprocal
            }
            (None, None) => return None,
        };

        self.current = Some(average);
        self.current
    }
}
