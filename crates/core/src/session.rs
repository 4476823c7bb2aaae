use crate::metric::MetricKey;
use crate::reading::Reading;
use crate::series::{Series, DEFAULT_CAPACITY};
use crate::status::AqiCategory;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// One aligned export row: a shared timestamp plus one value per metric, in
/// [`MetricKey::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub at:     DateTime<Local>,
    pub values: [Option<f64>; MetricKey::ALL.len()],
}

/// One dashboard session: the rolling windows for every metric plus the most
/// recent raw reading.
///
/// All series share one timestamp axis. [`Session::record`] appends to every
/// series in a single step — a reading with a missing field appends `None`
/// rather than skipping the series, so the windows can never drift out of
/// alignment even as they evict. Mutate from one task at a time; the session
/// has no internal locking.
#[derive(Debug, Clone)]
pub struct Session {
    series:      BTreeMap<MetricKey, Series>,
    latest:      Option<Reading>,
    last_update: Option<DateTime<Local>>,
}

impl Session {
    /// Session with the standard chart window of [`DEFAULT_CAPACITY`] samples.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Session with an explicit per-series window size.
    ///
    /// # Panics
    /// Panics if `capacity` is zero (see [`Series::new`]).
    pub fn with_capacity(capacity: usize) -> Self {
        let series = MetricKey::ALL
            .iter()
            .map(|&key| (key, Series::new(capacity)))
            .collect();
        Self {
            series,
            latest: None,
            last_update: None,
        }
    }

    /// Fold one inbound reading into the session at time `at`: one sample is
    /// appended to *every* series, absent fields as `None`.
    pub fn record(&mut self, reading: Reading, at: DateTime<Local>) {
        for (&key, series) in self.series.iter_mut() {
            series.append(at, reading.value(key));
        }
        self.latest = Some(reading);
        self.last_update = Some(at);
    }

    /// The rolling window for `key`. Every key in [`MetricKey::ALL`] exists.
    pub fn series(&self, key: MetricKey) -> &Series {
        &self.series[&key]
    }

    /// Number of aligned samples currently held (identical for all series).
    pub fn len(&self) -> usize {
        self.series
            .values()
            .map(Series::len)
            .min()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-series window size.
    pub fn capacity(&self) -> usize {
        self.series
            .values()
            .next()
            .map(Series::capacity)
            .unwrap_or(DEFAULT_CAPACITY)
    }

    /// Most recent raw reading, if any has arrived this session.
    pub fn latest(&self) -> Option<&Reading> {
        self.latest.as_ref()
    }

    /// Wall-clock time of the most recent reading.
    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    /// Overall category from the backend's verdict on the latest reading.
    pub fn overall(&self) -> Option<AqiCategory> {
        self.latest
            .as_ref()
            .and_then(|r| r.s_final.as_deref())
            .map(AqiCategory::from_verdict)
    }

    /// Lazy, restartable view of the window as aligned export rows, oldest
    /// first. Reads without mutating — call it as often as needed between
    /// appends. An empty window yields no rows; that is "nothing to export",
    /// not an error.
    pub fn rows(&self) -> impl Iterator<Item = ExportRow> + '_ {
        let len = self.len();
        // The timestamp axis is shared; any series can supply it.
        let times: Vec<DateTime<Local>> = self
            .series(MetricKey::ALL[0])
            .samples()
            .map(|s| s.at)
            .collect();
        let columns: Vec<Vec<Option<f64>>> = MetricKey::ALL
            .iter()
            .map(|&key| self.series(key).values())
            .collect();

        (0..len).map(move |i| {
            let mut values = [None; MetricKey::ALL.len()];
            for (slot, column) in values.iter_mut().zip(columns.iter()) {
                *slot = column[i];
            }
            ExportRow {
                at: times[i],
                values,
            }
        })
    }

    /// Empty every series and forget the latest reading. Full session reset.
    pub fn clear(&mut self) {
        for series in self.series.values_mut() {
            series.clear();
        }
        self.latest = None;
        self.last_update = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pm25: f64) -> Reading {
        Reading {
            ispu_pm25: Some(pm25),
            ispu_pm10: Some(pm25 + 1.0),
            temp: Some(30.0),
            hum: Some(60.0),
            ..Reading::default()
        }
    }

    #[test]
    fn fresh_session_exports_zero_rows() {
        let session = Session::new();
        assert_eq!(session.rows().count(), 0);
        assert!(session.is_empty());
    }

    #[test]
    fn partial_readings_keep_series_aligned() {
        let mut session = Session::with_capacity(5);
        session.record(reading(40.0), Local::now());
        session.record(Reading::default(), Local::now()); // every field absent
        session.record(reading(60.0), Local::now());

        for &key in MetricKey::ALL.iter() {
            assert_eq!(session.series(key).len(), 3);
        }
        let rows: Vec<ExportRow> = session.rows().collect();
        assert_eq!(rows.len(), 3);
        // Middle row is all gaps, passed through untouched.
        assert!(rows[1].values.iter().all(Option::is_none));
        assert_eq!(rows[2].values[0], Some(60.0));
    }

    #[test]
    fn rows_are_idempotent_between_appends() {
        let mut session = Session::with_capacity(4);
        session.record(reading(10.0), Local::now());
        session.record(reading(20.0), Local::now());

        let first: Vec<ExportRow> = session.rows().collect();
        let second: Vec<ExportRow> = session.rows().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn window_evicts_in_lockstep() {
        let mut session = Session::with_capacity(3);
        for v in [10.0, 20.0, 30.0, 40.0] {
            session.record(reading(v), Local::now());
        }
        let rows: Vec<ExportRow> = session.rows().collect();
        assert_eq!(rows.len(), 3);
        let pm25: Vec<Option<f64>> = rows.iter().map(|r| r.values[0]).collect();
        assert_eq!(pm25, vec![Some(20.0), Some(30.0), Some(40.0)]);
    }

    #[test]
    fn latest_and_overall_track_the_newest_reading() {
        let mut session = Session::new();
        assert!(session.overall().is_none());

        let mut r = reading(42.0);
        r.s_final = Some("SEDANG".to_string());
        session.record(r, Local::now());

        assert_eq!(session.overall(), Some(AqiCategory::Moderate));
        assert_eq!(session.latest().unwrap().ispu_pm25, Some(42.0));
        assert!(session.last_update().is_some());
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::with_capacity(3);
        session.record(reading(10.0), Local::now());
        session.clear();
        assert!(session.is_empty());
        assert!(session.latest().is_none());
        assert_eq!(session.rows().count(), 0);
    }
}
