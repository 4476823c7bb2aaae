pub mod schema;
pub mod share;

pub use schema::{ConnectionConfig, DashboardConfig, ExportConfig};
pub use share::{build_share_link, parse_share_link};

use aq_core::{DashboardError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `DashboardConfig::default()`
/// if the file doesn't exist so a fresh install still starts (and then fails
/// with a clear message only once a connection is actually required).
pub fn load(path: impl AsRef<Path>) -> Result<DashboardConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashboardConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashboardError::Config(format!("cannot read '{}': {e}", path.display())))?;

    toml::from_str(&raw).map_err(|e| DashboardError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("aqdash").join("aqdash.toml")
}

/// Resolve the effective configuration.
///
/// Precedence for the connection strings, strongest first:
/// 1. a share link passed on the command line,
/// 2. the `AQ_ENDPOINT` / `AQ_ACCESS_KEY` environment variables,
/// 3. the config file at `path`.
///
/// Fails with a config error when no source supplied both strings.
pub fn resolve(share_link: Option<&str>, path: impl AsRef<Path>) -> Result<DashboardConfig> {
    let mut config = load(path)?;

    if let Ok(endpoint) = std::env::var("AQ_ENDPOINT") {
        config.connection.endpoint = endpoint;
    }
    if let Ok(key) = std::env::var("AQ_ACCESS_KEY") {
        config.connection.access_key = key;
    }

    if let Some(link) = share_link {
        match share::parse_share_link(link) {
            Some((endpoint, key)) => {
                tracing::info!("Using connection settings from share link");
                config.connection.endpoint = endpoint;
                config.connection.access_key = key;
            }
            None => {
                return Err(DashboardError::Config(
                    "share link is missing the endpoint or key parameter".to_string(),
                ));
            }
        }
    }

    if !config.connection.is_complete() {
        return Err(DashboardError::Config(
            "no backend configured — set [connection] endpoint and access_key, \
             export AQ_ENDPOINT / AQ_ACCESS_KEY, or pass a share link"
                .to_string(),
        ));
    }

    Ok(config)
}
