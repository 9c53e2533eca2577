use crate::Price;

/// Fixed-capacity FIFO of the most recent values.
///
/// Once `capacity` values have been pushed, every further push evicts the
/// oldest entry. Iteration runs oldest to newest.
#[derive(Clone, Debug)]
pub(crate) struct HistoryWindow<T = Price> {
    buffer: Vec<T>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl<T: Copy + Default> HistoryWindow<T> {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "history window capacity must be positive");

        Self {
            buffer: vec![T::default(); capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Appends `value`, returning the evicted oldest entry when full.
    #[inline]
    pub(crate) fn push(&mut self, value: T) -> Option<T> {
        if self.is_full() {
            let old = self.buffer[self.head];

            self.buffer[self.head] = value;

            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer[self.len] = value;
            self.len += 1;

            None
        }
    }

    #[inline]
    pub(crate) fn oldest(&self) -> Option<T> {
        (self.len > 0).then(|| self.buffer[self.head])
    }

    /// Iterates from the oldest to the newest entry.
    pub(crate) fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.buffer[(self.head + i) % self.capacity])
    }
}

impl HistoryWindow<Price> {
    /// Number of entries between the newest entry and the highest value.
    ///
    /// `prefer_recent` decides ties: `true` picks the most recent occurrence,
    /// `false` the oldest. Returns `None` on an empty window.
    pub(crate) fn bars_since_max(&self, prefer_recent: bool) -> Option<usize> {
        self.bars_since_extremum(prefer_recent, |candidate, best| candidate > best)
    }

    /// Number of entries between the newest entry and the lowest value.
    ///
    /// Ties are decided as in [`bars_since_max`](Self::bars_since_max).
    pub(crate) fn bars_since_min(&self, prefer_recent: bool) -> Option<usize> {
        self.bars_since_extremum(prefer_recent, |candidate, best| candidate < best)
    }

    pub(crate) fn max(&self) -> Option<Price> {
        self.iter().reduce(f64::max)
    }

    pub(crate) fn min(&self) -> Option<Price> {
        self.iter().reduce(f64::min)
    }

    #[allow(clippy::float_cmp)]
    fn bars_since_extremum(
        &self,
        prefer_recent: bool,
        beats: impl Fn(Price, Price) -> bool,
    ) -> Option<usize> {
        let mut best: Option<(usize, Price)> = None;

        for (position, value) in self.iter().enumerate() {
            let replace = match best {
                None => true,
                Some((_, current)) => {
                    beats(value, current) || (prefer_recent && value == current)
                }
            };

            if replace {
                best = Some((position, value));
            }
        }

        best.map(|(position, _)| self.len - 1 - position)
    }
}
