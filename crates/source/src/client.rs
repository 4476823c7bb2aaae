use crate::protocol::{parse_row, SourceEvent, Subscribe};
use aq_core::{DashboardError, Reading, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Realtime feed client.
///
/// Connects to the backend endpoint, subscribes to the sensor table and
/// streams typed [`SourceEvent`]s. The backend sends the most recent stored
/// row immediately after the subscription, then every live insert — the
/// consumer performs exactly one append per row either way.
/// Automatically reconnects if the connection drops.
pub struct FeedClient {
    endpoint:   String,
    access_key: String,
    table:      String,
}

impl FeedClient {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            endpoint:   endpoint.into(),
            access_key: access_key.into(),
            table:      table.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Spawn a background task that owns the connection and forwards
    /// [`SourceEvent`]s on the returned channel.
    ///
    /// The task reconnects automatically 2 s after any failure and stops once
    /// every receiver is dropped.
    pub fn spawn_listener(self) -> mpsc::Receiver<SourceEvent> {
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            loop {
                match TcpStream::connect(&self.endpoint).await {
                    Ok(mut stream) => {
                        info!("Connected to sensor feed at {}", self.endpoint);

                        let subscribe =
                            Subscribe::stream(&self.access_key, &self.table).to_line();
                        if let Err(e) = stream.write_all(subscribe.as_bytes()).await {
                            error!("Subscribe failed: {e}; retrying in 2s…");
                        } else {
                            if tx.send(SourceEvent::Connected).await.is_err() {
                                return; // all receivers dropped
                            }

                            let mut lines = BufReader::new(stream).lines();
                            while let Ok(Some(line)) = lines.next_line().await {
                                match parse_row(&line) {
                                    Ok(reading) => {
                                        if tx.send(SourceEvent::Row(reading)).await.is_err() {
                                            return;
                                        }
                                    }
                                    // A bad row is the backend's problem, not a
                                    // reason to drop the subscription.
                                    Err(e) => warn!("Skipping row: {e}"),
                                }
                            }

                            warn!("Sensor feed connection lost; reconnecting in 2s…");
                            if tx.send(SourceEvent::Lost).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Cannot connect to sensor feed: {e}; retrying in 2s…");
                    }
                }

                if tx.is_closed() {
                    return;
                }
                tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
            }
        });

        rx
    }

    /// Fetch the single most recent stored row, one-shot.
    pub async fn fetch_latest(&self) -> Result<Reading> {
        let mut stream = TcpStream::connect(&self.endpoint)
            .await
            .map_err(|e| DashboardError::Source(format!("connect: {e}")))?;

        let request = Subscribe::latest(&self.access_key, &self.table).to_line();
        stream
            .write_all(request.as_bytes())
            .await
            .map_err(|e| DashboardError::Source(format!("write: {e}")))?;

        let mut lines = BufReader::new(&mut stream).lines();
        let line = lines
            .next_line()
            .await
            .map_err(|e| DashboardError::Source(format!("read: {e}")))?
            .ok_or_else(|| DashboardError::Source("backend closed without a row".into()))?;

        parse_row(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Serve `rows` (newline-joined) to the first client, then close.
    async fn one_shot_server(rows: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            // Consume the subscribe frame before answering.
            let mut buf = vec![0u8; 1024];
            use tokio::io::AsyncReadExt;
            let _ = stream.read(&mut buf).await;
            stream.write_all(rows.as_bytes()).await.unwrap();
        });

        addr
    }

    #[tokio::test]
    async fn listener_streams_snapshot_then_rows() {
        let addr =
            one_shot_server("{\"ispu_pm25\": 40.0}\n{\"ispu_pm25\": 55.0}\n").await;

        let mut rx = FeedClient::new(addr, "key", "sensors").spawn_listener();

        assert!(matches!(rx.recv().await, Some(SourceEvent::Connected)));
        let Some(SourceEvent::Row(first)) = rx.recv().await else {
            panic!("expected snapshot row");
        };
        assert_eq!(first.ispu_pm25, Some(40.0));
        let Some(SourceEvent::Row(second)) = rx.recv().await else {
            panic!("expected live row");
        };
        assert_eq!(second.ispu_pm25, Some(55.0));
        assert!(matches!(rx.recv().await, Some(SourceEvent::Lost)));
    }

    #[tokio::test]
    async fn listener_skips_malformed_rows() {
        let addr = one_shot_server("garbage\n{\"temp\": 28.5}\n").await;

        let mut rx = FeedClient::new(addr, "key", "sensors").spawn_listener();

        assert!(matches!(rx.recv().await, Some(SourceEvent::Connected)));
        let Some(SourceEvent::Row(row)) = rx.recv().await else {
            panic!("expected the valid row");
        };
        assert_eq!(row.temp, Some(28.5));
    }

    #[tokio::test]
    async fn fetch_latest_returns_one_row() {
        let addr = one_shot_server("{\"hum\": 71.0, \"s_final\": \"BAIK\"}\n").await;

        let client = FeedClient::new(addr, "key", "sensors");
        let reading = client.fetch_latest().await.unwrap();
        assert_eq!(reading.hum, Some(71.0));
        assert_eq!(reading.s_final.as_deref(), Some("BAIK"));
    }
}
