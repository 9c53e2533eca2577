use thiserror::Error;

/// Errors reported while constructing an indicator.
///
/// All validation happens up front: once an indicator exists, feeding it bars
/// has no failure path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// A period parameter is below the indicator's minimum.
    #[error("{name} is less than the minimum ({min}), got {value}")]
    PeriodTooSmall {
        name: &'static str,
        min: usize,
        value: usize,
    },

    /// A period parameter exceeds [`MAXIMUM_PERIOD`](crate::MAXIMUM_PERIOD).
    #[error("{name} is greater than the maximum ({max}), got {value}")]
    PeriodTooLarge {
        name: &'static str,
        max: usize,
        value: usize,
    },

    /// A config builder was built without a required parameter.
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// A [`Notifier`](crate::Notifier) was built without a value callback.
    #[error("an indicator without storage requires a value available action")]
    MissingValueAction,
}

/// Result alias for indicator construction.
pub type Result<T> = std::result::Result<T, IndicatorError>;
