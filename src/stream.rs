//! Single-threaded fan-out of bars to many indicator sinks.

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use crate::{BarIndex, Indicator, Notifier, Ohlcv, Series};

/// Anything that consumes bars from a [`BarStream`].
pub trait BarSubscriber<B> {
    /// Handles one bar.
    fn on_bar(&mut self, bar: &B);
}

impl<B: Ohlcv, I: Indicator> BarSubscriber<B> for Series<I> {
    #[inline]
    fn on_bar(&mut self, bar: &B) {
        self.compute(bar);
    }
}

impl<B: Ohlcv, I: Indicator> BarSubscriber<B> for Notifier<'_, I> {
    #[inline]
    fn on_bar(&mut self, bar: &B) {
        self.compute(bar);
    }
}

/// Shared handle to a subscriber.
pub type Subscription<'a, B> = Rc<RefCell<dyn BarSubscriber<B> + 'a>>;

/// Publishes bars to subscribers in subscription order.
///
/// The stream keeps no bar history; only the number of published bars and
/// the index of the last one are tracked.
///
/// Subscribers are shared with the caller through `Rc<RefCell<_>>`, so the
/// caller can read a [`Series`] while the stream still feeds it.
///
/// # Example
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use tickflow_ta::{Bar, BarStream, Series, Sma, SmaConfig};
///
/// let fast = Rc::new(RefCell::new(Series::new(Sma::new(SmaConfig::close(2)?))));
/// let slow = Rc::new(RefCell::new(Series::new(Sma::new(SmaConfig::close(3)?))));
///
/// let mut stream: BarStream<'_, Bar> = BarStream::new();
/// stream.subscribe(fast.clone());
/// stream.subscribe(slow.clone());
///
/// for (close, index) in [1.0, 2.0, 3.0, 4.0].into_iter().zip(1..) {
///     stream.publish(Bar::new(close, close, close, close, 0.0).at(index));
/// }
///
/// assert_eq!(fast.borrow().data(), &[1.5, 2.5, 3.5]);
/// assert_eq!(slow.borrow().data(), &[2.0, 3.0]);
/// assert_eq!(stream.published(), 4);
/// assert_eq!(stream.last_index(), Some(4));
/// # Ok::<(), tickflow_ta::IndicatorError>(())
/// ```
pub struct BarStream<'a, B> {
    subscribers: Vec<Subscription<'a, B>>,
    published: usize,
    last_index: Option<BarIndex>,
}

impl<'a, B: Ohlcv> BarStream<'a, B> {
    /// Creates a stream with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            published: 0,
            last_index: None,
        }
    }

    /// Registers a subscriber. It receives only bars published from now on.
    pub fn subscribe(&mut self, subscriber: Subscription<'a, B>) {
        self.subscribers.push(subscriber);
        tracing::trace!(
            subscribers = self.subscribers.len(),
            published = self.published,
            "bar stream subscription"
        );
    }

    /// Delivers `bar` to every subscriber, then drops it.
    ///
    /// # Panics
    ///
    /// Panics if a subscriber is already mutably borrowed by the caller.
    pub fn publish(&mut self, bar: B) {
        for subscriber in &self.subscribers {
            subscriber.borrow_mut().on_bar(&bar);
        }
        self.published += 1;
        self.last_index = Some(bar.index());
    }

    /// Number of bars published so far.
    #[inline]
    #[must_use]
    pub fn published(&self) -> usize {
        self.published
    }

    /// Index of the most recently published bar.
    #[inline]
    #[must_use]
    pub fn last_index(&self) -> Option<BarIndex> {
        self.last_index
    }

    /// Number of registered subscribers.
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<B: Ohlcv> Default for BarStream<'_, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Debug for BarStream<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BarStream))
            .field("subscribers", &self.subscribers.len())
            .field("published", &self.published)
            .field("last_index", &self.last_index)
            .finish()
    }
}
