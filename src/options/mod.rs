//! Validated configuration of the quantiles and bucket bounds to compute.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// Quantiles computed when the configuration supplies none. On the 0–100 scale accepted
/// by [`ApproximateHistogram::quantile`](crate::ApproximateHistogram::quantile); rendered
/// multiplied by 100 in summaries.
pub const DEFAULT_QUANTILES: &[f64] = &[0.0, 0.25, 0.5, 0.75, 0.90, 0.95, 0.99, 0.995, 0.999, 1.0];

/// Bucket upper bounds counted when the configuration supplies none. Unitless; for
/// duration histograms callers conventionally read them as milliseconds (0.5ms up to one
/// hour).
pub const DEFAULT_BUCKETS: &[f64] = &[
    0.5, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0,
    30000.0, 60000.0, 300000.0, 600000.0, 1800000.0, 3600000.0,
];

/// Immutable configuration of which statistics to compute for a histogram: the quantiles
/// to evaluate and the bucket upper bounds to count below.
///
/// Constructed once from configuration, then shared by reference (typically an
/// `Arc<HistogramOptions>`) across every histogram in the process. Both sequences are
/// expected in ascending order; each value in `supported_buckets` is the upper bound of a
/// bucket whose implicit lower bound is 0.
///
/// Deserializing goes through the same validation as [`HistogramOptions::new`], so a
/// configuration file with an out-of-range quantile fails to load instead of producing a
/// half-valid instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct HistogramOptions {
    #[serde(rename = "quantiles")]
    supported_quantiles: Vec<f64>,
    #[serde(rename = "buckets")]
    supported_buckets: Vec<f64>,
}

impl HistogramOptions {
    /// Construct options from the configured sequences.
    ///
    /// A non-empty `quantiles` sequence must lie entirely within `[0, 100]`; the first
    /// offending value is reported in the error. An empty sequence substitutes
    /// [`DEFAULT_QUANTILES`]. `buckets` are taken as given when non-empty, and an empty
    /// sequence substitutes [`DEFAULT_BUCKETS`].
    pub fn new(
        quantiles: Vec<f64>,
        buckets: Vec<f64>,
    ) -> Result<HistogramOptions, ConfigurationError> {
        for &quantile in &quantiles {
            if !(0.0..=100.0).contains(&quantile) {
                return Err(ConfigurationError::QuantileOutOfRange(quantile));
            }
        }

        Ok(HistogramOptions {
            supported_quantiles: if quantiles.is_empty() {
                DEFAULT_QUANTILES.to_vec()
            } else {
                quantiles
            },
            supported_buckets: if buckets.is_empty() {
                DEFAULT_BUCKETS.to_vec()
            } else {
                buckets
            },
        })
    }

    /// The quantiles to compute, ascending, each in `[0, 100]`.
    pub fn supported_quantiles(&self) -> &[f64] {
        &self.supported_quantiles
    }

    /// The bucket upper bounds to count below, ascending.
    pub fn supported_buckets(&self) -> &[f64] {
        &self.supported_buckets
    }
}

impl Default for HistogramOptions {
    fn default() -> HistogramOptions {
        HistogramOptions {
            supported_quantiles: DEFAULT_QUANTILES.to_vec(),
            supported_buckets: DEFAULT_BUCKETS.to_vec(),
        }
    }
}

#[derive(Deserialize)]
struct RawOptions {
    #[serde(default)]
    quantiles: Vec<f64>,
    #[serde(default)]
    buckets: Vec<f64>,
}

impl TryFrom<RawOptions> for HistogramOptions {
    type Error = ConfigurationError;

    fn try_from(raw: RawOptions) -> Result<HistogramOptions, ConfigurationError> {
        HistogramOptions::new(raw.quantiles, raw.buckets)
    }
}
