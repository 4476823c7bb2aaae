use aq_core::{DashboardError, Reading, Result};
use serde::Serialize;

/// Events forwarded by the feed listener task.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// Subscription established. The next row is the backend's stored
    /// snapshot; everything after it is the live stream.
    Connected,
    /// One sensor row — snapshot or live insert, the consumer treats both
    /// the same way: exactly one append per row.
    Row(Reading),
    /// Connection dropped; the listener will reconnect on its own.
    Lost,
}

/// First frame on every connection: what we want and proof we may have it.
#[derive(Debug, Clone, Serialize)]
pub struct Subscribe<'a> {
    pub key:   &'a str,
    pub table: &'a str,
    /// `"subscribe"` for snapshot-then-stream, `"latest"` for one row.
    pub mode:  &'a str,
}

impl<'a> Subscribe<'a> {
    pub fn stream(key: &'a str, table: &'a str) -> Self {
        Self {
            key,
            table,
            mode: "subscribe",
        }
    }

    pub fn latest(key: &'a str, table: &'a str) -> Self {
        Self {
            key,
            table,
            mode: "latest",
        }
    }

    /// Wire form: one JSON object, newline-terminated.
    pub fn to_line(&self) -> String {
        // Serializing a struct of string slices cannot fail.
        let mut line = serde_json::to_string(self).unwrap_or_default();
        line.push('\n');
        line
    }
}

/// Parse one wire line into a typed [`Reading`].
///
/// Rows are JSON objects, one per line. Unknown columns are ignored; known
/// columns that are absent surface as `None`.
pub fn parse_row(line: &str) -> Result<Reading> {
    serde_json::from_str(line)
        .map_err(|e| DashboardError::Source(format!("malformed row: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::MetricKey;

    #[test]
    fn parse_live_row() {
        let reading =
            parse_row(r#"{"ispu_pm25": 62.0, "temp": 31.0, "s_final": "SEDANG"}"#).unwrap();
        assert_eq!(reading.value(MetricKey::Pm25), Some(62.0));
        assert_eq!(reading.s_final.as_deref(), Some("SEDANG"));
    }

    #[test]
    fn malformed_row_is_an_error() {
        assert!(parse_row("not json").is_err());
        assert!(parse_row(r#"{"temp": "warm"}"#).is_err());
    }

    #[test]
    fn subscribe_frame_is_one_line() {
        let line = Subscribe::stream("anon-key", "sensors").to_line();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let frame: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(frame["key"], "anon-key");
        assert_eq!(frame["table"], "sensors");
        assert_eq!(frame["mode"], "subscribe");
    }
}
