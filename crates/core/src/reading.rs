use crate::metric::MetricKey;
use serde::{Deserialize, Serialize};

/// One row pushed by the backend: raw concentrations, the ISPU indices the
/// backend derived from them, and its overall verdict.
///
/// Every field is optional — sensors drop out, and a partial row is still a
/// valid reading. Absent values become `None` samples downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    // ── Raw sensor values ─────────────────────────────────────────────────────
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub co:   Option<f64>,
    pub so2:  Option<f64>,
    pub o3:   Option<f64>,
    pub no2:  Option<f64>,
    pub temp: Option<f64>,
    pub hum:  Option<f64>,

    // ── Backend-computed ISPU indices ─────────────────────────────────────────
    pub ispu_pm25: Option<f64>,
    pub ispu_pm10: Option<f64>,
    pub ispu_co:   Option<f64>,
    pub ispu_so2:  Option<f64>,
    pub ispu_o3:   Option<f64>,
    pub ispu_no2:  Option<f64>,

    /// Backend's overall air-quality verdict (e.g. `"BAIK"`, `"SEDANG"`).
    pub s_final: Option<String>,
}

impl Reading {
    /// The value charted for `key`: the ISPU index for pollutants, the raw
    /// reading for temperature and humidity.
    pub fn value(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Pm25        => self.ispu_pm25,
            MetricKey::Pm10        => self.ispu_pm10,
            MetricKey::Co          => self.ispu_co,
            MetricKey::So2         => self.ispu_so2,
            MetricKey::O3          => self.ispu_o3,
            MetricKey::No2         => self.ispu_no2,
            MetricKey::Temperature => self.temp,
            MetricKey::Humidity    => self.hum,
        }
    }

    /// The raw concentration / reading for `key`, as shown on the value cards.
    pub fn raw(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Pm25        => self.pm25,
            MetricKey::Pm10        => self.pm10,
            MetricKey::Co          => self.co,
            MetricKey::So2         => self.so2,
            MetricKey::O3          => self.o3,
            MetricKey::No2         => self.no2,
            MetricKey::Temperature => self.temp,
            MetricKey::Humidity    => self.hum,
        }
    }

    /// Raw value formatted with the metric's display precision, `"--"` when
    /// the field is absent.
    pub fn display_raw(&self, key: MetricKey) -> String {
        match self.raw(key) {
            Some(v) => format!("{v:.prec$}", prec = key.decimals()),
            None    => "--".to_string(),
        }
    }
}
