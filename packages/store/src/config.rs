//! # Application configuration: `gatherings.toml`
//!
//! Defines the TOML configuration shipped with the web build
//! (filename: [`AppConfig::filename`] = `"gatherings.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api/v1"
//!
//! [uploads]
//! max_size_mb = 10
//! accept = "image/*,application/pdf,.doc,.docx,.xls,.xlsx,.ppt,.pptx,.txt,.zip,.rar"
//!
//! [i18n]
//! default_locale = "es"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AppConfig`] | Top-level config with TOML (de)serialisation and builder helpers. |
//! | [`ApiConfig`] | REST API base URL. |
//! | [`UploadConfig`] | Client-side limits applied before an attachment upload. |
//! | [`I18nConfig`] | Locale used when the user has not picked one yet. |
//!
//! Every section derives `Default`, so a missing or empty file is equivalent to
//! the default configuration.

use serde::{Deserialize, Serialize};

/// Default REST API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Default accepted attachment types.
pub const DEFAULT_ACCEPT: &str =
    "image/*,application/pdf,.doc,.docx,.xls,.xlsx,.ppt,.pptx,.txt,.zip,.rar";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("api.base_url must start with http:// or https://, got {0:?}")]
    BaseUrl(String),
    #[error("uploads.max_size_mb must be greater than zero")]
    MaxSize,
}

/// Top-level configuration stored in `gatherings.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to. No trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum attachment size in megabytes.
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
    /// Comma-separated list of MIME types, `type/*` prefixes and `.ext` suffixes.
    #[serde(default = "default_accept")]
    pub accept: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct I18nConfig {
    /// `"es"` or `"en"`.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_size_mb() -> u64 {
    10
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

fn default_locale() -> String {
    "es".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_mb: default_max_size_mb(),
            accept: default_accept(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
        }
    }
}

impl AppConfig {
    /// Builder method to override the API base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "gatherings.toml"
    }

    /// Parse from a TOML string and check the values.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(url.clone()));
        }
        if self.uploads.max_size_mb == 0 {
            return Err(ConfigError::MaxSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.uploads.max_size_mb, 10);
        assert_eq!(config.i18n.default_locale, "es");
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://admin.example.org/api/v1/"

            [uploads]
            max_size_mb = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://admin.example.org/api/v1");
        assert_eq!(config.uploads.max_size_mb, 25);
        assert_eq!(config.uploads.accept, DEFAULT_ACCEPT);
        assert_eq!(config.i18n.default_locale, "es");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = AppConfig::from_toml("[api]\nbase_url = \"localhost:8000\"").unwrap_err();
        assert!(matches!(err, ConfigError::BaseUrl(_)));

        let err = AppConfig::from_toml("[uploads]\nmax_size_mb = 0").unwrap_err();
        assert!(matches!(err, ConfigError::MaxSize));

        let err = AppConfig::from_toml("[api\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default().with_base_url("https://api.example.org/");
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
