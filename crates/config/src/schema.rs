use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `aqdash.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How to reach the realtime backend.
    pub connection: ConnectionConfig,
    /// Where CSV dumps land.
    pub export: ExportConfig,
}

/// Connection bootstrap: two opaque strings identifying the backend plus the
/// table carrying sensor rows. Both strings are passed through untouched —
/// their meaning belongs to the backend, not to us.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Backend endpoint, `host:port`.
    pub endpoint: String,
    /// Opaque access key sent on subscribe.
    pub access_key: String,
    /// Table to subscribe to.
    pub table: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint:   String::new(),
            access_key: String::new(),
            table:      "sensors".to_string(),
        }
    }
}

impl ConnectionConfig {
    /// `true` once both opaque strings are present.
    pub fn is_complete(&self) -> bool {
        !self.endpoint.is_empty() && !self.access_key.is_empty()
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the dated CSV file is written into.
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
