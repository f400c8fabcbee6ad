//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::BROWSER_USER_AGENT;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Download settings
    #[serde(default)]
    pub downloads: DownloadConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloaded files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("downloads")
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

/// Load configuration from an optional TOML file, with `PAPER_HARVESTER_*`
/// environment variables layered on top. Without a file the env overlay still
/// applies on top of the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("PAPER_HARVESTER")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.downloads.output_dir, PathBuf::from("downloads"));
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_config_from_toml() {
        let parsed: Config = toml::from_str(
            r#"
            [downloads]
            output_dir = "/tmp/papers"

            [http]
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(parsed.downloads.output_dir, PathBuf::from("/tmp/papers"));
        assert_eq!(parsed.http.timeout_secs, 10);
        // Unset fields fall back to defaults
        assert_eq!(parsed.http.connect_timeout_secs, 10);
    }

    // One test covers both no-file cases; separate tests would race on the
    // process-wide environment variable.
    #[test]
    fn test_load_config_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.downloads.output_dir, PathBuf::from("downloads"));

        std::env::set_var("PAPER_HARVESTER_HTTP__TIMEOUT_SECS", "7");
        let overlaid = load_config(None).unwrap();
        std::env::remove_var("PAPER_HARVESTER_HTTP__TIMEOUT_SECS");

        assert_eq!(overlaid.http.timeout_secs, 7);
        // Everything not overridden keeps its default
        assert_eq!(overlaid.http.connect_timeout_secs, 10);
    }
}
