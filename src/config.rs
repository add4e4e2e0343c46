//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::time::Duration;

use reqwest::Url;

use crate::error::ClientError;

/// Path on the serving host that answers with the WebSocket port.
pub const WSPORT_PATH: &str = "/wsport";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Serving host as `host[:port]` (e.g. `127.0.0.1:4000`).
    pub host: String,

    /// Timeout in seconds for the `/wsport` request.
    pub bootstrap_timeout_secs: u64,

    /// Capacity of the channel carrying typed lines to the session task.
    pub input_channel_capacity: usize,

    /// Whether the port request honours `HTTP_PROXY` and friends.
    pub use_system_proxy: bool,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:4000".to_string(),
            bootstrap_timeout_secs: 10,
            input_channel_capacity: 64,
            use_system_proxy: false,
            log_format: LogFormat::Text,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given host with default settings.
    #[must_use]
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHost`] if `MUDMAKER_HOST` does not form
    /// a valid HTTP URL.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let host = std::env::var("MUDMAKER_HOST").unwrap_or(defaults.host);
        let bootstrap_timeout_secs = parse_env(
            "MUDMAKER_BOOTSTRAP_TIMEOUT_SECS",
            defaults.bootstrap_timeout_secs,
        )
        .max(1);
        let input_channel_capacity = parse_env(
            "MUDMAKER_INPUT_CHANNEL_CAPACITY",
            defaults.input_channel_capacity,
        )
        .max(1);
        let use_system_proxy = parse_env_bool("MUDMAKER_USE_SYSTEM_PROXY", defaults.use_system_proxy);
        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let config = Self {
            host,
            bootstrap_timeout_secs,
            input_channel_capacity,
            use_system_proxy,
            log_format,
        };
        config.wsport_url()?;
        Ok(config)
    }

    /// Returns the bootstrap timeout as a [`Duration`], never below one
    /// second.
    #[must_use]
    pub fn bootstrap_timeout(&self) -> Duration {
        Duration::from_secs(self.bootstrap_timeout_secs.max(1))
    }

    /// Returns `http://<host>/wsport`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHost`] if the host is empty or cannot be
    /// parsed into a URL.
    pub fn wsport_url(&self) -> Result<Url, ClientError> {
        if self.host.trim().is_empty() {
            return Err(ClientError::InvalidHost(self.host.clone()));
        }
        Url::parse(&format!("http://{}{WSPORT_PATH}", self.host))
            .map_err(|e| ClientError::InvalidHost(format!("{}: {e}", self.host)))
    }

    /// Returns the hostname part of the host, without any port.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHost`] if the host cannot be parsed or
    /// carries no hostname.
    pub fn hostname(&self) -> Result<String, ClientError> {
        let url = self.wsport_url()?;
        url.host_str()
            .map(str::to_string)
            .ok_or_else(|| ClientError::InvalidHost(self.host.clone()))
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}
