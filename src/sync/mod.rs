//! Concurrent recording and periodic consolidation on top of the core sketch.
//!
//! Two roles share a [`ParentHistogram`]: any number of *recorder* threads, each holding
//! a [`Histogram`] front handle whose [`record_value`](Histogram::record_value) is
//! wait-free with respect to consolidation, and a single *consolidator* that calls
//! [`ParentHistogram::merge`] on a periodic tick. Recorded values travel over an
//! unbounded lock-free channel; `merge()` drains whatever has been delivered into an
//! interval sketch, folds the interval into a cumulative sketch, and publishes immutable
//! [`HistogramStatistics`] snapshots for both. Readers may fetch snapshots from any
//! thread at any time; they always observe a self-consistent snapshot produced by some
//! completed `merge()`, because snapshots are replaced whole, never mutated.

use std::ops::AddAssign;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::counter::Counter;
use crate::{ApproximateHistogram, HistogramOptions, HistogramStatistics};

/// A write-only recording front for a [`ParentHistogram`].
///
/// Handles are cheap to clone and hand one per recording context. Recording a value
/// forwards it toward the owning parent's pending-delivery buffer without blocking and
/// without touching interval or cumulative state — consolidating delivered values is
/// exclusively [`ParentHistogram::merge`]'s job, so a recorded value becomes visible in
/// statistics only after the next consolidation cycle.
///
/// A front comes in two flavors: the active one minted by
/// [`ParentHistogram::recorder`], and the no-op sink from [`Histogram::null`] used
/// where no real aggregation is configured — it accepts and discards every value and
/// reports [`used()`](Histogram::used) as `false`.
#[derive(Debug, Clone)]
pub struct Histogram {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Active {
        name: Arc<str>,
        sender: crossbeam_channel::Sender<u64>,
    },
    Null,
}

impl Histogram {
    /// A sink that accepts and discards every value.
    pub fn null() -> Histogram {
        Histogram { inner: Inner::Null }
    }

    /// Record an unsigned value. For duration histograms, values are conventionally in
    /// milliseconds. Never blocks.
    pub fn record_value(&self, value: u64) {
        if let Inner::Active { sender, .. } = &self.inner {
            let _ = sender.send(value).is_ok(); // if this is err, the consolidator went away
        }
    }

    /// Whether values recorded here go anywhere: `true` for a front minted from a
    /// parent, `false` for the null sink.
    pub fn used(&self) -> bool {
        match self.inner {
            Inner::Active { .. } => true,
            Inner::Null => false,
        }
    }

    /// The owning parent's name, or `""` for the null sink.
    pub fn name(&self) -> &str {
        match &self.inner {
            Inner::Active { name, .. } => name,
            Inner::Null => "",
        }
    }
}

// make it more ergonomic to record samples
impl AddAssign<u64> for Histogram {
    fn add_assign(&mut self, value: u64) {
        self.record_value(value);
    }
}

/// Interval and cumulative sketch state, mutated only under the merge lock.
#[derive(Debug)]
struct Sketches<C: Counter> {
    interval: ApproximateHistogram<C>,
    cumulative: ApproximateHistogram<C>,
}

/// The consolidation entity: owns the interval and cumulative sketches for one logical
/// histogram, plus the two most recent statistics snapshots.
///
/// The interval sketch holds only samples delivered since the previous consolidation
/// cycle and is reset at the end of each one; the cumulative sketch holds every sample
/// ever delivered and only grows. Before the first [`merge`](Self::merge) the parent is
/// unused ([`used()`](Self::used) is `false`) and both snapshots are all-zero.
#[derive(Debug)]
pub struct ParentHistogram<C: Counter> {
    name: Arc<str>,
    options: Arc<HistogramOptions>,
    sender: crossbeam_channel::Sender<u64>,
    receiver: crossbeam_channel::Receiver<u64>,
    sketches: Mutex<Sketches<C>>,
    interval_statistics: Mutex<Arc<HistogramStatistics>>,
    cumulative_statistics: Mutex<Arc<HistogramStatistics>>,
    used: AtomicBool,
}

impl<C: Counter> ParentHistogram<C> {
    /// Construct an empty parent computing the statistics configured in `options`.
    pub fn new<S: Into<String>>(name: S, options: Arc<HistogramOptions>) -> ParentHistogram<C> {
        let name: String = name.into();
        let (sender, receiver) = crossbeam_channel::unbounded();
        let empty = Arc::new(HistogramStatistics::empty(Arc::clone(&options)));
        ParentHistogram {
            name: Arc::from(name),
            options,
            sender,
            receiver,
            sketches: Mutex::new(Sketches {
                interval: ApproximateHistogram::new(),
                cumulative: ApproximateHistogram::new(),
            }),
            interval_statistics: Mutex::new(Arc::clone(&empty)),
            cumulative_statistics: Mutex::new(empty),
            used: AtomicBool::new(false),
        }
    }

    /// Obtain a recording front for this parent.
    ///
    /// Values recorded through the front will not be visible in statistics until the
    /// next call to [`merge`](Self::merge).
    pub fn recorder(&self) -> Histogram {
        Histogram {
            inner: Inner::Active {
                name: Arc::clone(&self.name),
                sender: self.sender.clone(),
            },
        }
    }

    /// Record a value directly on the parent. Identical delivery semantics to recording
    /// through a front handle.
    pub fn record_value(&self, value: u64) {
        let _ = self.sender.send(value).is_ok(); // receiver lives in self
    }

    /// Run one consolidation cycle.
    ///
    /// Drains every value delivered since the previous cycle into the interval sketch,
    /// folds the interval into the cumulative sketch, recomputes both statistics
    /// snapshots, and resets the interval sketch for the next cycle. Intended to be
    /// driven by a single periodic scheduler context; the internal lock serializes
    /// overlapping calls rather than corrupting state.
    pub fn merge(&self) {
        let mut sketches = self.sketches.lock().unwrap();
        for value in self.receiver.try_iter() {
            sketches.interval.insert(value as f64);
        }

        let Sketches {
            interval,
            cumulative,
        } = &mut *sketches;
        cumulative.merge_from(interval);

        let interval_statistics =
            Arc::new(HistogramStatistics::new(&*interval, Arc::clone(&self.options)));
        let cumulative_statistics =
            Arc::new(HistogramStatistics::new(&*cumulative, Arc::clone(&self.options)));
        interval.clear();

        *self.interval_statistics.lock().unwrap() = interval_statistics;
        *self.cumulative_statistics.lock().unwrap() = cumulative_statistics;
        self.used.store(true, Ordering::Release);
    }

    /// The statistics snapshot for the most recently consolidated interval. All-zero
    /// until the first [`merge`](Self::merge).
    pub fn interval_statistics(&self) -> Arc<HistogramStatistics> {
        Arc::clone(&self.interval_statistics.lock().unwrap())
    }

    /// The cumulative statistics snapshot over every sample ever consolidated. All-zero
    /// until the first [`merge`](Self::merge).
    pub fn cumulative_statistics(&self) -> Arc<HistogramStatistics> {
        Arc::clone(&self.cumulative_statistics.lock().unwrap())
    }

    /// The interval snapshot's quantile line; see
    /// [`HistogramStatistics::quantile_summary`].
    pub fn quantile_summary(&self) -> String {
        self.interval_statistics().quantile_summary()
    }

    /// The interval snapshot's bucket line; see
    /// [`HistogramStatistics::bucket_summary`].
    pub fn bucket_summary(&self) -> String {
        self.interval_statistics().bucket_summary()
    }

    /// Whether at least one consolidation cycle has completed.
    pub fn used(&self) -> bool {
        self.used.load(Ordering::Acquire)
    }

    /// This histogram's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The options these statistics are computed under.
    pub fn options(&self) -> &Arc<HistogramOptions> {
        &self.options
    }
}
