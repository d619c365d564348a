//! llhist provides recording and analyzing of sampled data values (latencies, payload
//! sizes, queue depths) in a bounded-memory, mergeable, log-linear histogram. Samples are
//! recorded one at a time from any number of worker threads and periodically consolidated
//! into immutable point-in-time statistics: approximate quantiles, approximate per-bucket
//! counts, an exact sample count and an approximate sample sum.
//!
//! # The sketch
//!
//! [`ApproximateHistogram`] partitions the positive reals into log-linear bins keyed by a
//! decimal exponent and the first two significant decimal digits of the value: a positive
//! value `v` lands in the bin covering `[m/10 * 10^e, (m+1)/10 * 10^e)` where
//! `e = floor(log10 v)` and `m` is in `[10, 99]`. Every bin therefore spans at most 10% of
//! its own magnitude, which bounds the relative error of any value reconstructed from a bin
//! at 5%. Zero gets a dedicated bin of its own. Ninety bins cover each decade, and the
//! number of decades is limited by the exponent range of `f64`, so memory stays bounded no
//! matter how many samples are recorded or how widely their magnitudes range.
//!
//! Recording never fails: every representable input has a bin, inserting allocates at most
//! one new bin per never-before-seen key, and bin counts saturate rather than overflow.
//! Two histograms can be merged bin-by-bin; merging is commutative and associative, so
//! sharded recording followed by any order of merges produces identical query results.
//!
//! # Recording samples
//!
//! ```
//! use llhist::ApproximateHistogram;
//!
//! let mut hist = ApproximateHistogram::<u64>::new();
//! hist.insert(54.3);
//!
//! // for ergonomics, samples can also be recorded with +=
//! hist += 54.3;
//!
//! assert_eq!(hist.total_count(), 2);
//! ```
//!
//! The `u64` annotation selects the per-bin count type. It can be narrowed to reduce the
//! storage overhead of each bin, at the cost of saturating earlier if a very large number
//! of samples land in the same bin; see [`Counter`].
//!
//! # Querying
//!
//! ```
//! use llhist::ApproximateHistogram;
//!
//! let mut hist = ApproximateHistogram::<u64>::new();
//! for v in &[1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 9.0] {
//!     hist.insert(*v);
//! }
//! println!("# of samples: {}", hist.total_count());
//! println!("median: {}", hist.quantile(50.0));
//! println!("samples <= 5: {}", hist.count_below(5.0));
//! ```
//!
//! Quantile and count-below queries walk the occupied bins in ascending value order and
//! interpolate linearly inside the bin where the threshold falls, assuming samples are
//! uniformly distributed within a bin. Computed quantiles, bucket counts, the sum and the
//! mean are approximations with the relative error bound above; only `total_count` is
//! exact. Callers must not assume exactness.
//!
//! # Consolidation
//!
//! The `sync` module (enabled by default) layers a concurrent recording front on top of
//! the sketch: any number of threads record through cheap [`sync::Histogram`] handles
//! while a single consolidator periodically calls [`sync::ParentHistogram::merge`] to
//! drain delivered samples into an interval sketch, fold the interval into a cumulative
//! sketch, and publish fresh [`HistogramStatistics`] snapshots for both. Readers get
//! immutable snapshots and never contend with recorders.

use serde::{Deserialize, Serialize};

pub mod core;
pub mod errors;
pub mod iterators;
mod options;
mod statistics;
#[cfg(feature = "sync")]
pub mod sync;

pub use crate::core::counter::Counter;
pub use crate::errors::ConfigurationError;
pub use crate::options::{HistogramOptions, DEFAULT_BUCKETS, DEFAULT_QUANTILES};
pub use crate::statistics::HistogramStatistics;

use crate::iterators::Iter;

/// The log-linear coordinates of one bin: `exponent` is the decimal exponent of the bin's
/// values, `mantissa` their first two significant decimal digits, in `[10, 99]`. The
/// derived ordering (exponent first, then mantissa) is ascending value order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub(crate) struct BinKey {
    exponent: i16,
    mantissa: u8,
}

impl BinKey {
    /// The key of the bin containing `value`. Requires `value > 0` and finite.
    fn of(value: f64) -> BinKey {
        debug_assert!(value > 0.0 && value <= f64::MAX);

        let exponent = value.log10().floor() as i32;
        let mantissa = match 10f64.powi(exponent) {
            pow if pow > 0.0 => (value / pow * 10.0) as i32,
            // 10^exponent underflowed (subnormal range); start at the bottom of the
            // decade and let the boundary walk below find the right bin
            _ => 10,
        };
        let mut key = BinKey {
            exponent: exponent as i16,
            mantissa: mantissa.max(10).min(99) as u8,
        };

        // log10 and the mantissa division both round, so the estimate can sit one bin
        // (or, around subnormals, a few bins) away from the one whose half-open range
        // actually contains the value. Walk until the bounds agree.
        while key.upper() <= value {
            key = key.next();
        }
        while key.lower() > value {
            key = key.prev();
        }
        key
    }

    /// Lowest value representable by this bin (inclusive). The mantissa is scaled down
    /// before the multiply so the bound only overflows to infinity when it truly lies
    /// beyond `f64::MAX`.
    pub(crate) fn lower(&self) -> f64 {
        f64::from(self.mantissa) / 10.0 * 10f64.powi(i32::from(self.exponent))
    }

    /// Lowest value of the next bin (this bin's exclusive upper bound).
    pub(crate) fn upper(&self) -> f64 {
        f64::from(self.mantissa + 1) / 10.0 * 10f64.powi(i32::from(self.exponent))
    }

    fn next(self) -> BinKey {
        if self.mantissa == 99 {
            BinKey {
                exponent: self.exponent + 1,
                mantissa: 10,
            }
        } else {
            BinKey {
                mantissa: self.mantissa + 1,
                ..self
            }
        }
    }

    fn prev(self) -> BinKey {
        if self.mantissa == 10 {
            BinKey {
                exponent: self.exponent - 1,
                mantissa: 99,
            }
        } else {
            BinKey {
                mantissa: self.mantissa - 1,
                ..self
            }
        }
    }
}

/// One occupied bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Bin<C> {
    key: BinKey,
    count: C,
}

/// A bounded-memory, mergeable log-linear histogram sketch.
///
/// See the [crate-level documentation](index.html) for the bin partition and its error
/// bound. `C` is the per-bin count type; `u64` unless memory is tight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproximateHistogram<C: Counter> {
    /// Occupied bins, sorted by key (ascending value order).
    bins: Vec<Bin<C>>,
    /// Samples recorded as zero (or clamped up to it).
    zero_count: C,
    /// Exact number of samples recorded, across all bins.
    total_count: u64,
}

// construction

impl<C: Counter> ApproximateHistogram<C> {
    /// Construct an empty histogram. Does not allocate until the first insert.
    pub fn new() -> ApproximateHistogram<C> {
        ApproximateHistogram {
            bins: Vec::new(),
            zero_count: C::zero(),
            total_count: 0,
        }
    }
}

impl<C: Counter> Default for ApproximateHistogram<C> {
    fn default() -> ApproximateHistogram<C> {
        ApproximateHistogram::new()
    }
}

// recording

impl<C: Counter> ApproximateHistogram<C> {
    /// Record `value` in the histogram.
    ///
    /// Defined for every `f64`: non-positive and NaN inputs count into the zero bin,
    /// positive infinity is clamped to `f64::MAX`. The bin count saturates in `C`;
    /// the total count is incremented by exactly one.
    pub fn insert(&mut self, value: f64) {
        self.insert_n(value, C::one());
    }

    /// Record `count` occurrences of `value` in the histogram.
    pub fn insert_n(&mut self, value: f64, count: C) {
        if count.is_zero() {
            return;
        }
        if value > 0.0 {
            self.add_count(BinKey::of(value.min(f64::MAX)), count);
        } else {
            self.zero_count = self.zero_count.saturating_add(count);
        }
        self.total_count = self.total_count.saturating_add(count.as_u64());
    }

    fn add_count(&mut self, key: BinKey, count: C) {
        match self.bins.binary_search_by(|bin| bin.key.cmp(&key)) {
            Ok(i) => self.bins[i].count = self.bins[i].count.saturating_add(count),
            Err(i) => self.bins.insert(i, Bin { key, count }),
        }
    }

    /// Reset the contents of this histogram. Bin storage is retained for reuse.
    pub fn clear(&mut self) {
        self.bins.clear();
        self.zero_count = C::zero();
        self.total_count = 0;
    }
}

impl<C: Counter> std::ops::AddAssign<f64> for ApproximateHistogram<C> {
    fn add_assign(&mut self, value: f64) {
        self.insert(value);
    }
}

// merging

impl<C: Counter> ApproximateHistogram<C> {
    /// Add the contents of `other` into this histogram, bin by bin, creating bins that
    /// are absent from `self`.
    ///
    /// Merging is commutative and associative: merging the same underlying samples in any
    /// order or grouping produces an identical bin multiset, and thus identical query
    /// results. Runs in O(bins of `other`) lookups.
    pub fn merge_from(&mut self, other: &ApproximateHistogram<C>) {
        for bin in &other.bins {
            self.add_count(bin.key, bin.count);
        }
        self.zero_count = self.zero_count.saturating_add(other.zero_count);
        self.total_count = self.total_count.saturating_add(other.total_count);
    }
}

impl<'a, C: Counter> std::ops::AddAssign<&'a ApproximateHistogram<C>> for ApproximateHistogram<C> {
    fn add_assign(&mut self, other: &'a ApproximateHistogram<C>) {
        self.merge_from(other);
    }
}

// queries

impl<C: Counter> ApproximateHistogram<C> {
    /// Get the approximate value below which `q` percent of the recorded samples fall,
    /// for `q` in `[0, 100]` (out-of-range inputs are clamped).
    ///
    /// Walks the bins in ascending order accumulating counts until the running total
    /// reaches `q/100 * total_count`, then interpolates linearly between the straddling
    /// bin's bounds. Reaching a cumulative boundary exactly yields that bin's upper
    /// bound. An empty histogram returns 0 for every `q`; `q = 0` returns the minimum
    /// representable value and `q = 100` the maximum.
    pub fn quantile(&self, q: f64) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let q = q.max(0.0).min(100.0);
        if q == 0.0 {
            return self.min();
        }
        if q == 100.0 {
            return self.max();
        }

        let threshold = q / 100.0 * self.total_count as f64;
        for item in self.iter_recorded() {
            if item.running_total() as f64 >= threshold {
                let preceding = (item.running_total() - item.count().as_u64()) as f64;
                let fraction = (threshold - preceding) / item.count().as_f64();
                return item.value_lower() + (item.value_upper() - item.value_lower()) * fraction;
            }
        }
        self.max()
    }

    /// Get the approximate number of recorded samples `<= threshold`.
    ///
    /// Bins entirely below the threshold contribute their full count; the straddling bin
    /// contributes the linearly interpolated share of its count. Non-decreasing in
    /// `threshold` for a fixed histogram state.
    pub fn count_below(&self, threshold: f64) -> f64 {
        let mut count = 0.0;
        for item in self.iter_recorded() {
            if item.value_upper() <= threshold {
                count += item.count().as_f64();
            } else if item.value_lower() > threshold {
                break;
            } else {
                let width = item.value_upper() - item.value_lower();
                count += item.count().as_f64() * (threshold - item.value_lower()) / width;
                break;
            }
        }
        count
    }

    /// Exact number of samples recorded.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Approximate sum of all recorded samples, accumulated as bin midpoint times bin
    /// count. An approximation by design; the exact sum is not retained.
    pub fn total_sum(&self) -> f64 {
        self.iter_recorded()
            .map(|item| item.midpoint() * item.count().as_f64())
            .sum()
    }

    /// Lowest value representable by any occupied bin, or 0 if empty.
    pub fn min(&self) -> f64 {
        if self.total_count == 0 || self.zero_count.as_u64() > 0 {
            0.0
        } else {
            self.bins.first().map_or(0.0, |bin| bin.key.lower())
        }
    }

    /// Highest value representable by any occupied bin, or 0 if empty.
    pub fn max(&self) -> f64 {
        self.bins.last().map_or(0.0, |bin| bin.key.upper())
    }

    /// Approximate mean of the recorded samples, or 0 if empty.
    pub fn mean(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.total_sum() / self.total_count as f64
    }

    /// Approximate standard deviation of the recorded samples, or 0 if empty.
    pub fn stdev(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq = self.iter_recorded().fold(0.0, |acc, item| {
            let dev = item.midpoint() - mean;
            acc + dev * dev * item.count().as_f64()
        });
        (sum_sq / self.total_count as f64).sqrt()
    }

    /// Number of occupied bins (the zero bin included when occupied).
    pub fn bin_count(&self) -> usize {
        self.bins.len() + if self.zero_count.as_u64() > 0 { 1 } else { 0 }
    }

    /// `true` if no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Iterate over the occupied bins in ascending value order, with running totals.
    pub fn iter_recorded(&self) -> Iter<'_, C> {
        Iter::new(self)
    }
}

#[cfg(test)]
mod tests;
