use crate::error::{Result, ShimError};
use crate::translate::request::SamplingDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "llama-stack-shim";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShimConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub defaults: SamplingDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_models_path")]
    pub models_path: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    4223
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_models_path() -> String {
    "/v1/models".to_string()
}

fn default_chat_path() -> String {
    "/inference/chat_completion".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            models_path: default_models_path(),
            chat_path: default_chat_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            upstream: UpstreamConfig::default(),
            defaults: SamplingDefaults::default(),
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ShimConfig {
    /// Load config from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShimError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Search standard locations for a config file.
    /// Priority: CLI arg > CWD > XDG config > home dir > built-in defaults
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in &config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(candidate);
            }
        }

        tracing::info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.upstream.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ShimError::config(format!(
                "upstream.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        for (key, path) in [
            ("models_path", &self.upstream.models_path),
            ("chat_path", &self.upstream.chat_path),
        ] {
            if !path.starts_with('/') {
                return Err(ShimError::config(format!(
                    "upstream.{key} must start with '/', got '{path}'"
                )));
            }
        }
        Ok(())
    }
}

#[must_use]
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(format!("{APP_NAME}.toml"))];

    if cfg!(target_os = "macos") {
        if let Some(home) = home_dir() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join(APP_NAME)
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join(APP_NAME).join("config.toml"));
        }
        if let Some(home) = home_dir() {
            paths.push(home.join(".config").join(APP_NAME).join("config.toml"));
        }
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(format!(".{APP_NAME}.toml")));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
port = 5001

[upstream]
base_url = "http://llama-stack:5000"
chat_path = "/alpha/inference/chat-completion"

[defaults]
max_tokens = 256
temperature = 0.2
"#
        )
        .unwrap();

        let config = ShimConfig::load(f.path()).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.upstream.base_url, "http://llama-stack:5000");
        assert_eq!(config.upstream.chat_path, "/alpha/inference/chat-completion");
        assert_eq!(config.upstream.models_path, "/v1/models");
        assert_eq!(config.defaults.max_tokens, 256);
        assert_eq!(config.defaults.temperature, 0.2);
        assert_eq!(config.defaults.top_k, 50);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let f = NamedTempFile::new().unwrap();
        let config = ShimConfig::load(f.path()).unwrap();
        assert_eq!(config.port, 4223);
        assert_eq!(config.upstream.timeout(), Duration::from_secs(300));
        assert_eq!(config.defaults, SamplingDefaults::default());
    }

    #[test]
    fn test_rejects_relative_chat_path() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[upstream]\nchat_path = \"inference\"").unwrap();

        let err = ShimConfig::load(f.path()).unwrap_err();
        assert!(err.to_string().contains("chat_path"));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = ShimConfig {
            upstream: UpstreamConfig {
                base_url: "llama-stack:5000".to_string(),
                ..UpstreamConfig::default()
            },
            ..ShimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_paths_start_in_cwd() {
        let paths = config_search_paths();
        assert_eq!(paths[0], PathBuf::from("llama-stack-shim.toml"));
    }
}
