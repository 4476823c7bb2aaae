use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Number of samples each chart keeps — every series in a session shares it.
pub const DEFAULT_CAPACITY: usize = 20;

/// One observation: the instant it arrived and the value it carried.
///
/// `value` is `None` when the backend row omitted this metric; gaps are data,
/// not errors, and flow unmodified into chart arrays and CSV rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub at:    DateTime<Local>,
    pub value: Option<f64>,
}

/// Rolling window over the most recent observations of a single metric.
///
/// Bounded FIFO: appending beyond `capacity` evicts the oldest sample.
/// Appends are expected in arrival order; out-of-order timestamps are
/// accepted and stored as-is — ordering is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct Series {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl Series {
    /// Create an empty series holding at most `capacity` samples.
    ///
    /// # Panics
    /// Panics if `capacity` is zero — a window that can hold nothing is a
    /// construction bug, not a runtime condition.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "series capacity must be positive");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if the window is full.
    pub fn append(&mut self, at: DateTime<Local>, value: Option<f64>) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { at, value });
    }

    /// Drop every sample. Used only on full session reset.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recently appended sample, if any.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Time-of-day axis labels, parallel to [`Series::values`].
    /// This is the shape charting surfaces consume on every redraw.
    pub fn labels(&self) -> Vec<String> {
        self.samples
            .iter()
            .map(|s| s.at.format("%H:%M:%S").to_string())
            .collect()
    }

    /// Data points parallel to [`Series::labels`]; `None` renders as a gap.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn len_is_min_of_appends_and_capacity() {
        let mut s = Series::new(5);
        for i in 0..12 {
            s.append(t(), Some(i as f64));
            assert_eq!(s.len(), usize::min(i + 1, 5));
        }
    }

    #[test]
    fn eviction_is_fifo() {
        // Capacity 3, append 10 20 30 40 → window is 20 30 40.
        let mut s = Series::new(3);
        for v in [10.0, 20.0, 30.0, 40.0] {
            s.append(t(), Some(v));
        }
        assert_eq!(s.values(), vec![Some(20.0), Some(30.0), Some(40.0)]);
    }

    #[test]
    fn oldest_retained_is_exactly_n_minus_c_plus_one() {
        let mut s = Series::new(7);
        for i in 1..=30 {
            s.append(t(), Some(i as f64));
        }
        // 30 appends into capacity 7 → oldest retained is insert 24.
        assert_eq!(s.values()[0], Some(24.0));
    }

    #[test]
    fn order_preserved_under_eviction() {
        let mut s = Series::new(4);
        for i in 0..50 {
            s.append(t(), Some(i as f64));
        }
        let vals: Vec<f64> = s.values().into_iter().flatten().collect();
        assert!(vals.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn none_values_pass_through() {
        let mut s = Series::new(5);
        s.append(t(), Some(5.0));
        s.append(t(), None);
        s.append(t(), Some(15.0));
        assert_eq!(s.values(), vec![Some(5.0), None, Some(15.0)]);
        assert_eq!(s.labels().len(), 3);
    }

    #[test]
    fn clear_empties_the_window() {
        let mut s = Series::new(3);
        s.append(t(), Some(1.0));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), 3);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_is_rejected() {
        let _ = Series::new(0);
    }
}
