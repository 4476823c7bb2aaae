use serde::{Deserialize, Serialize};

/// Identifies one monitored series on the dashboard.
///
/// The six pollutant keys refer to the *ISPU index* derived from that
/// pollutant (computed upstream by the backend), not the raw concentration.
/// Temperature and humidity are plain physical readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Pm25,
    Pm10,
    Co,
    So2,
    O3,
    No2,
    Temperature,
    Humidity,
}

impl MetricKey {
    /// Every metric tracked by a session, in chart / CSV column order.
    pub const ALL: [MetricKey; 8] = [
        MetricKey::Pm25,
        MetricKey::Pm10,
        MetricKey::Co,
        MetricKey::So2,
        MetricKey::O3,
        MetricKey::No2,
        MetricKey::Temperature,
        MetricKey::Humidity,
    ];

    /// Human-readable chart label.
    pub fn label(self) -> &'static str {
        match self {
            MetricKey::Pm25        => "ISPU PM2.5",
            MetricKey::Pm10        => "ISPU PM10",
            MetricKey::Co          => "ISPU CO",
            MetricKey::So2         => "ISPU SO2",
            MetricKey::O3          => "ISPU O3",
            MetricKey::No2         => "ISPU NO2",
            MetricKey::Temperature => "Temperature",
            MetricKey::Humidity    => "Humidity",
        }
    }

    /// Column name in the CSV export header.
    pub fn column(self) -> &'static str {
        match self {
            MetricKey::Pm25        => "PM2.5",
            MetricKey::Pm10        => "PM10",
            MetricKey::Co          => "CO",
            MetricKey::So2         => "SO2",
            MetricKey::O3          => "O3",
            MetricKey::No2         => "NO2",
            MetricKey::Temperature => "Temp",
            MetricKey::Humidity    => "Humidity",
        }
    }

    /// Decimal places used when displaying the *raw* reading for this metric.
    pub fn decimals(self) -> usize {
        match self {
            MetricKey::Pm25 | MetricKey::Pm10 => 0,
            MetricKey::Co | MetricKey::So2 | MetricKey::O3 | MetricKey::No2 => 2,
            MetricKey::Temperature | MetricKey::Humidity => 1,
        }
    }

    /// `true` for the six pollutant keys whose charted value is an ISPU index.
    pub fn is_index(self) -> bool {
        !matches!(self, MetricKey::Temperature | MetricKey::Humidity)
    }

    /// Suggested chart y-axis maximum (ISPU scale tops out at 500).
    pub fn suggested_max(self) -> f64 {
        match self {
            MetricKey::Temperature => 50.0,
            MetricKey::Humidity    => 100.0,
            _                      => 500.0,
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
