//! Config types for indicators parameterised by a single period.
//!
//! Most indicators take one period and, when they run on a scalar series, a
//! [`PriceSource`](crate::PriceSource). The two macros here generate the config
//! value type, its builder and the [`IndicatorConfig`](crate::IndicatorConfig)
//! plumbing for those; multi-period indicators (MACD, Stochastic, StochRSI)
//! write theirs by hand.

/// Config over bar fields with a single `period`.
macro_rules! period_config {
    (
        $(#[$meta:meta])*
        $config:ident, $builder:ident,
        min = $min:expr,
        default = $default:expr,
        lookback = |$period:ident| $lookback:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $config {
            period: usize,
        }

        impl $crate::IndicatorConfig for $config {
            type Builder = $builder;

            #[inline]
            fn builder() -> Self::Builder {
                $builder::new()
            }

            #[inline]
            fn lookback_period(&self) -> usize {
                let $period = self.period;
                $lookback
            }
        }

        impl $config {
            /// Smallest accepted period.
            pub const MIN_PERIOD: usize = $min;

            /// Config with the given period.
            ///
            /// # Errors
            ///
            /// Returns [`IndicatorError`](crate::IndicatorError) if `period`
            /// is out of range.
            pub fn new(period: usize) -> $crate::error::Result<Self> {
                $crate::IndicatorConfigBuilder::build(
                    <Self as $crate::IndicatorConfig>::builder().period(period),
                )
            }

            /// Number of bars in the smoothing window.
            #[inline]
            #[must_use]
            pub fn period(&self) -> usize {
                self.period
            }
        }

        impl Default for $config {
            fn default() -> Self {
                Self { period: $default }
            }
        }

        impl std::fmt::Display for $config {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($config), self.period)
            }
        }

        #[doc = concat!("Builder for [`", stringify!($config), "`].")]
        ///
        /// The period must be set before calling
        /// [`build`](crate::IndicatorConfigBuilder::build).
        #[derive(Clone, Copy, Debug)]
        pub struct $builder {
            period: Option<usize>,
        }

        impl $builder {
            fn new() -> Self {
                Self { period: None }
            }

            /// Sets the period.
            #[inline]
            #[must_use]
            pub fn period(mut self, period: usize) -> Self {
                self.period = Some(period);
                self
            }
        }

        impl $crate::IndicatorConfigBuilder<$config> for $builder {
            fn build(self) -> $crate::error::Result<$config> {
                $crate::indicator::rejected(
                    stringify!($config),
                    $crate::indicator::require("period", self.period)
                        .and_then(|period| $crate::indicator::check_period("period", period, $min))
                        .map(|period| $config { period }),
                )
            }
        }
    };
}

/// Config over a [`PriceSource`](crate::PriceSource) scalar with a single
/// `period`.
macro_rules! source_config {
    (
        $(#[$meta:meta])*
        $config:ident, $builder:ident,
        min = $min:expr,
        default = $default:expr,
        lookback = |$period:ident| $lookback:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $config {
            period: usize,
            source: $crate::PriceSource,
        }

        impl $crate::IndicatorConfig for $config {
            type Builder = $builder;

            #[inline]
            fn builder() -> Self::Builder {
                $builder::new()
            }

            #[inline]
            fn lookback_period(&self) -> usize {
                let $period = self.period;
                $lookback
            }
        }

        impl $config {
            /// Smallest accepted period.
            pub const MIN_PERIOD: usize = $min;

            /// Config on closing price.
            ///
            /// # Errors
            ///
            /// Returns [`IndicatorError`](crate::IndicatorError) if `period`
            /// is out of range.
            pub fn close(period: usize) -> $crate::error::Result<Self> {
                Self::with_source(period, $crate::PriceSource::Close)
            }

            /// Config on an arbitrary price source.
            ///
            /// # Errors
            ///
            /// Returns [`IndicatorError`](crate::IndicatorError) if `period`
            /// is out of range.
            pub fn with_source(
                period: usize,
                source: $crate::PriceSource,
            ) -> $crate::error::Result<Self> {
                $crate::IndicatorConfigBuilder::build(
                    <Self as $crate::IndicatorConfig>::builder()
                        .period(period)
                        .source(source),
                )
            }

            /// Number of values in the window.
            #[inline]
            #[must_use]
            pub fn period(&self) -> usize {
                self.period
            }

            /// Scalar extracted from each bar.
            #[inline]
            #[must_use]
            pub fn source(&self) -> $crate::PriceSource {
                self.source
            }
        }

        impl Default for $config {
            fn default() -> Self {
                Self {
                    period: $default,
                    source: $crate::PriceSource::Close,
                }
            }
        }

        impl std::fmt::Display for $config {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({}, {})", stringify!($config), self.period, self.source)
            }
        }

        #[doc = concat!("Builder for [`", stringify!($config), "`].")]
        ///
        /// Defaults: source = [`PriceSource::Close`](crate::PriceSource::Close).
        /// The period must be set before calling
        /// [`build`](crate::IndicatorConfigBuilder::build).
        #[derive(Clone, Copy, Debug)]
        pub struct $builder {
            period: Option<usize>,
            source: $crate::PriceSource,
        }

        impl $builder {
            fn new() -> Self {
                Self {
                    period: None,
                    source: $crate::PriceSource::Close,
                }
            }

            /// Sets the period.
            #[inline]
            #[must_use]
            pub fn period(mut self, period: usize) -> Self {
                self.period = Some(period);
                self
            }

            /// Sets the price source.
            #[inline]
            #[must_use]
            pub fn source(mut self, source: $crate::PriceSource) -> Self {
                self.source = source;
                self
            }
        }

        impl $crate::IndicatorConfigBuilder<$config> for $builder {
            fn build(self) -> $crate::error::Result<$config> {
                $crate::indicator::rejected(
                    stringify!($config),
                    $crate::indicator::require("period", self.period)
                        .and_then(|period| $crate::indicator::check_period("period", period, $min))
                        .map(|period| $config {
                            period,
                            source: self.source,
                        }),
                )
            }
        }
    };
}

pub(crate) use period_config;
pub(crate) use source_config;
