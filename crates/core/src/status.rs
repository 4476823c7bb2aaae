use serde::{Deserialize, Serialize};

/// Air-quality category for an ISPU index value.
///
/// ISPU banding: 0–50 good, 51–100 moderate, above 100 unhealthy. The finer
/// official bands (very unhealthy, hazardous) are collapsed into `Unhealthy`,
/// matching the three indicator colors the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
}

impl AqiCategory {
    /// Classify a single ISPU index value.
    pub fn from_index(value: f64) -> Self {
        if value <= 50.0 {
            AqiCategory::Good
        } else if value <= 100.0 {
            AqiCategory::Moderate
        } else {
            AqiCategory::Unhealthy
        }
    }

    /// Map the backend's overall verdict string onto a category.
    /// Unrecognized labels read as unhealthy rather than optimistic.
    pub fn from_verdict(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "BAIK" | "GOOD"        => AqiCategory::Good,
            "SEDANG" | "MODERATE"  => AqiCategory::Moderate,
            _                      => AqiCategory::Unhealthy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good      => "GOOD",
            AqiCategory::Moderate  => "MODERATE",
            AqiCategory::Unhealthy => "UNHEALTHY",
        }
    }

    /// Indicator color (hex) used by any render surface for this category.
    pub fn color(self) -> &'static str {
        match self {
            AqiCategory::Good      => "#00e676",
            AqiCategory::Moderate  => "#ffea00",
            AqiCategory::Unhealthy => "#ff3d00",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
