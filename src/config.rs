use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Version check constants
// =============================================================================

/// Public latest-versions feed
pub const DEFAULT_VERSION_CHECK_URL: &str = "https://versioncheck.channel-check.dev/version.json";

/// Timeout for the latest-versions fetch in milliseconds (5 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 5_000;

/// Timeout for the latest-versions fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(FETCH_TIMEOUT_MS);

/// Timeout for the server version query in milliseconds (5 seconds)
pub const SERVER_VERSION_TIMEOUT_MS: u64 = 5_000;

/// `source` reported to the feed when none is configured
pub const DEFAULT_SOURCE: &str = "cli";

// =============================================================================
// Environment variables
// =============================================================================

/// Replaces the running version when none was bound at build time
pub const VERSION_OVERRIDE_ENV: &str = "CHANNEL_CHECK_VERSION_OVERRIDE";

/// Log filter directives (e.g. `debug`, `channel_check=trace`)
pub const LOG_FILTER_ENV: &str = "CHANNEL_CHECK_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    pub feed: FeedConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// Latest-versions feed configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedConfig {
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub source: String,
    pub uuid: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_VERSION_CHECK_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            source: DEFAULT_SOURCE.to_string(),
            uuid: String::new(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Server whose version is compared with the client's
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub url: Option<String>,
    /// Version query timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: SERVER_VERSION_TIMEOUT_MS,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Write JSON logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

/// Loads the configuration at `path`.
///
/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub fn load_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CheckConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the path to the data directory for channel-check.
/// Uses $XDG_DATA_HOME/channel-check if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/channel-check,
/// or ./channel-check if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("channel-check")
}
