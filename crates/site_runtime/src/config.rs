//! Typed site configuration loaded from TOML.
//!
//! Parsing only checks shape; [`SiteConfig::from_toml_str`] then validates the endpoints the
//! search pipeline cannot work without.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse site config: {0}")]
    Parse(String),
    #[error("site config is missing `{0}`")]
    Missing(&'static str),
    #[error("`{field}` must be an http(s) URL, found {value:?}")]
    InvalidEndpoint { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocodingConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderSearchConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub verify_endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    pub geocoding: GeocodingConfig,
    pub provider_search: ProviderSearchConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

impl SiteConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_endpoint("geocoding.endpoint", &self.geocoding.endpoint)?;
        if self.geocoding.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("geocoding.api_key"));
        }
        check_endpoint("provider_search.endpoint", &self.provider_search.endpoint)?;
        if let Some(endpoint) = &self.admin.verify_endpoint {
            check_endpoint("admin.verify_endpoint", endpoint)?;
        }
        Ok(())
    }
}

fn check_endpoint(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(field));
    }
    let usable = Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some_and(|host| !host.is_empty())
    });
    if !usable {
        return Err(ConfigError::InvalidEndpoint {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
