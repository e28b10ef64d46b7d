//! # API Configuration
//!
//! Server settings: listen address, request limits, log format.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RECEIPT_API_BIND_ADDR=0.0.0.0:8080                                 │
//! │     RECEIPT_API_MAX_BODY_BYTES=1048576                                 │
//! │     RECEIPT_API_REQUEST_TIMEOUT_SECS=10                                │
//! │     RECEIPT_API_LOG_FORMAT=pretty                                      │
//! │                                                                         │
//! │  2. TOML Config File (path in RECEIPT_API_CONFIG)                      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # receipt-api.toml
//! bind_addr = "127.0.0.1:9000"
//! max_body_bytes = 65536
//! request_timeout_secs = 5
//! log_format = "json"  # pretty | json
//! ```

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Environment Variables
// =============================================================================

pub const CONFIG_FILE_VAR: &str = "RECEIPT_API_CONFIG";
pub const BIND_ADDR_VAR: &str = "RECEIPT_API_BIND_ADDR";
pub const MAX_BODY_BYTES_VAR: &str = "RECEIPT_API_MAX_BODY_BYTES";
pub const REQUEST_TIMEOUT_VAR: &str = "RECEIPT_API_REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "RECEIPT_API_LOG_FORMAT";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Log Format
// =============================================================================

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored, for terminals.
    #[default]
    Pretty,

    /// One JSON object per line, for log shippers.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue(LOG_FORMAT_VAR.to_string())),
        }
    }
}

// =============================================================================
// API Config
// =============================================================================

/// Receipt API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// Largest accepted request body, in bytes (default: 1 MiB)
    pub max_body_bytes: usize,

    /// Requests running longer than this get 408
    pub request_timeout_secs: u64,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    ///
    /// ## Arguments
    /// * `lookup` - Returns the value of an environment variable, if set
    ///
    /// ## Example
    /// ```rust
    /// use receipt_api::config::ApiConfig;
    ///
    /// let config = ApiConfig::from_lookup(|key| match key {
    ///     "RECEIPT_API_BIND_ADDR" => Some("127.0.0.1:3000".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.bind_addr.port(), 3000);
    /// assert_eq!(config.max_body_bytes, 1 << 20);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = parse_var(BIND_ADDR_VAR, &value)?;
        }
        if let Some(value) = lookup(MAX_BODY_BYTES_VAR) {
            config.max_body_bytes = parse_var(MAX_BODY_BYTES_VAR, &value)?;
        }
        if let Some(value) = lookup(REQUEST_TIMEOUT_VAR) {
            config.request_timeout_secs = parse_var(REQUEST_TIMEOUT_VAR, &value)?;
        }
        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.log_format = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects limits that would refuse every request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue(MAX_BODY_BYTES_VAR.to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(REQUEST_TIMEOUT_VAR.to_string()));
        }
        Ok(())
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(var.to_string()))
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("receipt-api-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_env_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (BIND_ADDR_VAR, "127.0.0.1:9999"),
            (MAX_BODY_BYTES_VAR, "2048"),
            (REQUEST_TIMEOUT_VAR, "3"),
            (LOG_FORMAT_VAR, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9999);
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = ApiConfig::from_lookup(lookup_from(&[(BIND_ADDR_VAR, "not-an-address")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for RECEIPT_API_BIND_ADDR");

        let err = ApiConfig::from_lookup(lookup_from(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for RECEIPT_API_LOG_FORMAT");

        let err = ApiConfig::from_lookup(lookup_from(&[(MAX_BODY_BYTES_VAR, "-1")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for RECEIPT_API_MAX_BODY_BYTES");
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = ApiConfig::from_lookup(lookup_from(&[(MAX_BODY_BYTES_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == MAX_BODY_BYTES_VAR));

        let err = ApiConfig::from_lookup(lookup_from(&[(REQUEST_TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var) if var == REQUEST_TIMEOUT_VAR));
    }

    #[test]
    fn test_file_then_env() {
        let path = temp_config(
            "layered",
            "bind_addr = \"127.0.0.1:7000\"\nrequest_timeout_secs = 30\nlog_format = \"json\"\n",
        );
        let path_str = path.to_string_lossy().to_string();

        let config = ApiConfig::from_lookup(lookup_from(&[
            (CONFIG_FILE_VAR, path_str.as_str()),
            (REQUEST_TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        // from the file
        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.log_format, LogFormat::Json);
        // env wins over the file
        assert_eq!(config.request_timeout_secs, 5);
        // untouched by either
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_file_errors() {
        let err = ApiConfig::from_file("/nonexistent/receipt-api.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let path = temp_config("unknown-key", "port = 8080\n");
        let err = ApiConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
