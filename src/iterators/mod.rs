//! Iteration over the occupied bins of a histogram.

use crate::core::counter::Counter;
use crate::ApproximateHistogram;

/// An iterator over a histogram's occupied bins in ascending value order, yielding one
/// [`IterationValue`] per bin. The zero bin, when occupied, is yielded first. Bins never
/// recorded into are skipped.
pub struct Iter<'a, C: Counter> {
    hist: &'a ApproximateHistogram<C>,
    index: usize,
    zero_visited: bool,
    running_total: u64,
}

impl<'a, C: Counter> Iter<'a, C> {
    pub(crate) fn new(hist: &'a ApproximateHistogram<C>) -> Iter<'a, C> {
        Iter {
            hist,
            index: 0,
            zero_visited: false,
            running_total: 0,
        }
    }
}

impl<'a, C: Counter> Iterator for Iter<'a, C> {
    type Item = IterationValue<C>;

    fn next(&mut self) -> Option<IterationValue<C>> {
        if !self.zero_visited {
            self.zero_visited = true;
            let zero_count = self.hist.zero_count;
            if zero_count.as_u64() > 0 {
                self.running_total += zero_count.as_u64();
                return Some(IterationValue {
                    lower: 0.0,
                    upper: 0.0,
                    count: zero_count,
                    running_total: self.running_total,
                    total_count: self.hist.total_count(),
                });
            }
        }

        let bin = self.hist.bins.get(self.index)?;
        self.index += 1;
        self.running_total += bin.count.as_u64();
        Some(IterationValue {
            lower: bin.key.lower(),
            upper: bin.key.upper(),
            count: bin.count,
            running_total: self.running_total,
            total_count: self.hist.total_count(),
        })
    }
}

/// One step of a bin walk: the bin's representable bounds, its count, and the cumulative
/// count up to and including it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationValue<C: Counter> {
    lower: f64,
    upper: f64,
    count: C,
    running_total: u64,
    total_count: u64,
}

impl<C: Counter> IterationValue<C> {
    /// Lowest value representable by this bin (inclusive). The zero bin reports 0.
    pub fn value_lower(&self) -> f64 {
        self.lower
    }

    /// This bin's exclusive upper bound. The zero bin reports 0.
    pub fn value_upper(&self) -> f64 {
        self.upper
    }

    /// The middle of this bin's representable range, used when a single value has to
    /// stand in for the whole bin (sums, means).
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Number of samples recorded into this bin.
    pub fn count(&self) -> C {
        self.count
    }

    /// Cumulative sample count up to and including this bin.
    pub fn running_total(&self) -> u64 {
        self.running_total
    }

    /// Percent of all recorded samples at or below this bin, in `[0, 100]`.
    pub fn quantile(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            100.0 * self.running_total as f64 / self.total_count as f64
        }
    }
}
