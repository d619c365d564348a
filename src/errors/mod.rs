use std::error::Error;
use std::fmt;

/// Errors that can occur when constructing [`HistogramOptions`](crate::HistogramOptions).
///
/// Configuration is the only fallible surface of this crate: recording, merging and
/// querying are defined for all reachable inputs and never fail. A configuration error is
/// fatal to the caller — an explicitly supplied invalid value is rejected rather than
/// silently replaced by a default (defaults substitute only for *absent* sequences).
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ConfigurationError {
    /// A supplied quantile lies outside the closed range `[0, 100]`. Carries the
    /// offending value.
    QuantileOutOfRange(f64),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::QuantileOutOfRange(quantile) => {
                write!(f, "Quantile {} is not valid.", quantile)
            }
        }
    }
}

impl Error for ConfigurationError {}
