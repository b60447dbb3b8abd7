use crate::core::ConfigProvider;
use crate::utils::error::{FanoutError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_urls, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub urls: Vec<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FanoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_urls("fetch.urls", &self.fetch.urls)?;
        if let Some(timeout) = self.fetch.timeout_seconds {
            validate_positive_number("fetch.timeout_seconds", timeout, 1)?;
        }
        if let Some(user_agent) = &self.fetch.user_agent {
            validate_non_empty_string("fetch.user_agent", user_agent)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn urls(&self) -> &[String] {
        &self.fetch.urls
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.fetch.timeout_seconds
    }

    fn user_agent(&self) -> Option<&str> {
        self.fetch.user_agent.as_deref()
    }
}
