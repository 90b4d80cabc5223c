use serde::{Deserialize, Serialize};

/// Runtime settings injected at startup.
///
/// Pages receive this instead of reading the environment themselves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AppConfig {
    /// Root of the HTTP API, e.g. `https://hr.example.com/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("baseUrl must not be empty")]
    EmptyBaseUrl,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl AppConfig {
    /// # Errors
    /// Returns `ConfigError::EmptyBaseUrl` for a blank URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from TOML text, e.g. `baseUrl = "/api"`.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys, and
    /// `ConfigError::EmptyBaseUrl` for a blank URL.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(base_url = %config.base_url, "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(())
    }

    /// Joins `path` onto the base URL with exactly one `/` between them
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
