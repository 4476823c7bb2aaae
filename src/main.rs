//! aqdash — a headless air-quality dashboard over a realtime sensor feed.
//!
//! Run with:  `RUST_LOG=info aqdash [share-link]`
//!
//! Connection settings come from a share link argument, the `AQ_ENDPOINT` /
//! `AQ_ACCESS_KEY` environment variables, or the config file — in that order.
//! On Ctrl-C the current chart window is dumped to a dated CSV file.

use anyhow::Result;
use aq_core::{AqiCategory, MetricKey, Session};
use aq_source::{FeedClient, SourceEvent};
use chrono::Local;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("aqdash v{} starting", env!("CARGO_PKG_VERSION"));

    let share_link = std::env::args().nth(1);
    let config = aq_config::resolve(share_link.as_deref(), aq_config::default_path())?;

    let mut session = Session::new();
    let client = FeedClient::new(
        config.connection.endpoint.clone(),
        config.connection.access_key.clone(),
        config.connection.table.clone(),
    );
    let mut events = client.spawn_listener();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(SourceEvent::Connected) => {
                    tracing::info!("Subscribed to '{}'", config.connection.table);
                }
                Some(SourceEvent::Row(reading)) => {
                    session.record(reading, Local::now());
                    log_reading(&session);
                }
                Some(SourceEvent::Lost) => {
                    tracing::warn!("Feed connection lost — window keeps its samples");
                }
                None => {
                    tracing::error!("Feed listener stopped");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    if session.is_empty() {
        tracing::warn!("No data to export");
    } else {
        let (path, rows) = aq_export::export_to_dir(&session, &config.export.dir)?;
        tracing::info!("Wrote {rows} rows to {}", path.display());
    }

    Ok(())
}

/// One log line per reading: the overall verdict plus the worst index.
fn log_reading(session: &Session) {
    let overall = session
        .overall()
        .map(|c| c.label())
        .unwrap_or("UNKNOWN");

    let worst = MetricKey::ALL
        .iter()
        .filter(|m| m.is_index())
        .filter_map(|&m| {
            let v = session.series(m).latest()?.value?;
            Some((m, v))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match worst {
        Some((metric, value)) => tracing::info!(
            "{overall} — worst index {metric} = {value:.0} ({})",
            AqiCategory::from_index(value).label()
        ),
        None => tracing::info!("{overall} — no index values in this reading"),
    }
}
