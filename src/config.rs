use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

// ---------------------------------------------------------------------------
// Upstream
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API (e.g. `https://api.github.com`).
    /// A trailing slash is trimmed at load time.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout, in seconds, for upstream GET calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address for the HTTP listener (e.g. `0.0.0.0:8080`).
    #[serde(default = "default_http_listen")]
    pub http_listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_listen: default_http_listen(),
        }
    }
}

fn default_http_listen() -> String {
    "0.0.0.0:8080".to_string()
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Load and validate a [`Config`] from a YAML file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let mut config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config.upstream.api_url = config.upstream.api_url.trim_end_matches('/').to_string();
    validate_config(&config)?;
    Ok(config)
}

/// Basic sanity checks that cannot be expressed purely with serde.
fn validate_config(config: &Config) -> Result<()> {
    anyhow::ensure!(
        !config.upstream.api_url.is_empty(),
        "upstream.api_url must not be empty"
    );
    anyhow::ensure!(
        config.upstream.request_timeout_secs >= 1,
        "upstream.request_timeout_secs must be at least 1"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_from_str(yaml: &str) -> Result<Config> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        load_config(file.path())
    }

    #[test]
    fn empty_mapping_yields_defaults() {
        let config = load_from_str("{}").unwrap();
        assert_eq!(config.upstream.api_url, "https://api.github.com");
        assert_eq!(config.upstream.request_timeout_secs, 5);
        assert_eq!(config.server.http_listen, "0.0.0.0:8080");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config =
            load_from_str("upstream:\n  api_url: \"https://ghe.corp.example.com/api/v3/\"\n")
                .unwrap();
        assert_eq!(config.upstream.api_url, "https://ghe.corp.example.com/api/v3");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load_from_str("upstream:\n  request_timeout_secs: 0\n").unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config("/nonexistent/hubcache.yaml").is_err());
    }
}
