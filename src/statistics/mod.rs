//! Point-in-time computed statistics for a histogram.

use std::sync::Arc;

use crate::core::counter::Counter;
use crate::{ApproximateHistogram, HistogramOptions};

/// An immutable snapshot of the statistics configured in a [`HistogramOptions`], computed
/// from one histogram state at one point in time.
///
/// `computed_quantiles` and `computed_buckets` run parallel to the options'
/// `supported_quantiles` and `supported_buckets`, always the same length and order. A
/// snapshot is never updated in place as observed by readers: consolidation builds a new
/// one and publishes it by replacing a shared handle, and [`refresh`](Self::refresh)
/// requires exclusive access.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramStatistics {
    options: Arc<HistogramOptions>,
    computed_quantiles: Vec<f64>,
    computed_buckets: Vec<f64>,
    sample_count: u64,
    sample_sum: f64,
}

impl HistogramStatistics {
    /// An all-zero snapshot: what a histogram that has never been consolidated reports.
    pub fn empty(options: Arc<HistogramOptions>) -> HistogramStatistics {
        let quantiles = options.supported_quantiles().len();
        let buckets = options.supported_buckets().len();
        HistogramStatistics {
            options,
            computed_quantiles: vec![0.0; quantiles],
            computed_buckets: vec![0.0; buckets],
            sample_count: 0,
            sample_sum: 0.0,
        }
    }

    /// Compute a snapshot of `histogram` under `options`.
    pub fn new<C: Counter>(
        histogram: &ApproximateHistogram<C>,
        options: Arc<HistogramOptions>,
    ) -> HistogramStatistics {
        let mut statistics = HistogramStatistics::empty(options);
        statistics.refresh(histogram);
        statistics
    }

    /// Recompute every output from `histogram`, discarding the previously computed
    /// values. Exclusive access makes the update atomic: no reader can observe a mix of
    /// old and new fields.
    pub fn refresh<C: Counter>(&mut self, histogram: &ApproximateHistogram<C>) {
        let computed_quantiles = self
            .options
            .supported_quantiles()
            .iter()
            .map(|&q| histogram.quantile(q))
            .collect();
        let computed_buckets = self
            .options
            .supported_buckets()
            .iter()
            .map(|&bound| histogram.count_below(bound))
            .collect();
        self.computed_quantiles = computed_quantiles;
        self.computed_buckets = computed_buckets;
        self.sample_count = histogram.total_count();
        self.sample_sum = histogram.total_sum();
    }

    /// The quantiles these statistics were computed for.
    pub fn supported_quantiles(&self) -> &[f64] {
        self.options.supported_quantiles()
    }

    /// The computed value at each supported quantile, in matching order.
    pub fn computed_quantiles(&self) -> &[f64] {
        &self.computed_quantiles
    }

    /// The bucket upper bounds these statistics were computed for.
    pub fn supported_buckets(&self) -> &[f64] {
        self.options.supported_buckets()
    }

    /// The approximate count of samples at or below each supported bucket bound, in
    /// matching order.
    pub fn computed_buckets(&self) -> &[f64] {
        &self.computed_buckets
    }

    /// Exact number of samples in the evaluated histogram state.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Approximate sum of samples in the evaluated histogram state.
    pub fn sample_sum(&self) -> f64 {
        self.sample_sum
    }

    /// Render the computed quantiles as `P<quantile*100>: <value>` pairs joined by `", "`,
    /// in ascending quantile order, e.g. `P95: 12.5`. This exact format is consumed by
    /// exposition and debug endpoints.
    pub fn quantile_summary(&self) -> String {
        self.supported_quantiles()
            .iter()
            .zip(&self.computed_quantiles)
            .map(|(quantile, value)| format!("P{}: {}", 100.0 * quantile, value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render the computed bucket counts as `B<bound>: <count>` pairs joined by `", "`,
    /// in ascending bound order, e.g. `B250: 17`. Bounds render as configured, without a
    /// unit suffix.
    pub fn bucket_summary(&self) -> String {
        self.supported_buckets()
            .iter()
            .zip(&self.computed_buckets)
            .map(|(bound, count)| format!("B{}: {}", bound, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
