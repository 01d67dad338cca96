//! Runtime configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Deployment configuration, loaded from TOML with `${VAR}` environment
/// expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Base URL of the web app the collection lives in.
    pub base_url: String,
    /// Request timeout for remote calls, in seconds.
    pub timeout_seconds: u64,
    /// Override for the local data directory; platform default when unset.
    pub data_dir: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.clipnest.io".to_string(),
            timeout_seconds: 30,
            data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML string.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(content)?;
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// The external sign-in page the gate redirects to.
    pub fn sign_in_url(&self) -> String {
        format!("{}/sign-in", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The resolved data directory, tilde-expanded.
    pub fn data_dir(&self) -> Option<String> {
        self.data_dir
            .as_deref()
            .map(|d| shellexpand::tilde(d).to_string())
    }
}

/// Expand environment variables in the format `${VAR}`.
fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = content.to_string();
    let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("valid regex");

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let var_value =
            std::env::var(var_name).map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
        result = result.replace(&cap[0], &var_value);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::load_str("").unwrap();
        assert_eq!(config.base_url, "https://app.clipnest.io");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_load_basic() {
        let config = RuntimeConfig::load_str(
            r#"
            base_url = "https://collection.example.com"
            timeout_seconds = 5
        "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://collection.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_sign_in_url_from_base() {
        let config = RuntimeConfig {
            base_url: "https://a.example.com/".to_string(),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.sign_in_url(), "https://a.example.com/sign-in");
    }

    #[test]
    fn test_env_expansion() {
        // Unlikely to collide; set for this process only.
        unsafe { std::env::set_var("CLIPNEST_TEST_BASE", "https://env.example.com") };
        let config = RuntimeConfig::load_str(r#"base_url = "${CLIPNEST_TEST_BASE}""#).unwrap();
        assert_eq!(config.base_url, "https://env.example.com");
    }

    #[test]
    fn test_missing_env_var_errors() {
        let err = RuntimeConfig::load_str(r#"base_url = "${CLIPNEST_NO_SUCH_VAR}""#).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotSet(_)));
    }

    #[test]
    fn test_data_dir_tilde_expansion() {
        let config = RuntimeConfig {
            data_dir: Some("~/.clipnest".to_string()),
            ..RuntimeConfig::default()
        };
        assert!(!config.data_dir().unwrap().starts_with('~'));
    }
}
