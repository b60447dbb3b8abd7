use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{FanoutError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_urls, Validate,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sum-content-length")]
#[command(about = "Fetch URLs concurrently and sum their Content-Length headers")]
pub struct CliConfig {
    /// URLs to fetch
    pub urls: Vec<String>,

    #[arg(long, help = "TOML file with a [fetch] section")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Cancel outstanding requests after this many seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Folds a config file into the CLI arguments. File URLs come first;
    /// scalar options given on the command line win.
    pub fn merge_file(mut self, file: TomlConfig) -> Self {
        let mut urls = file.fetch.urls;
        urls.append(&mut self.urls);
        self.urls = urls;
        self.timeout_secs = self.timeout_secs.or(file.fetch.timeout_seconds);
        self.user_agent = self.user_agent.or(file.fetch.user_agent);
        self
    }

    /// Loads `--config` when given, then merges it.
    pub fn resolve(self) -> Result<Self> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                tracing::debug!("Loaded {} URLs from {}", file.urls().len(), path.display());
                Ok(self.merge_file(file))
            }
            None => Ok(self),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.urls.is_empty() {
            return Err(FanoutError::MissingConfigError {
                field: "urls".to_string(),
            });
        }
        validate_urls("urls", &self.urls)?;
        if let Some(timeout) = self.timeout_secs {
            validate_positive_number("timeout_secs", timeout, 1)?;
        }
        if let Some(user_agent) = &self.user_agent {
            validate_non_empty_string("user_agent", user_agent)?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn urls(&self) -> &[String] {
        &self.urls
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_secs
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}
