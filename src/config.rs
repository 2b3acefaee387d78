//! Configuration handling for the wizard

use crate::api::RetryPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API base location
pub const API_URL_ENV: &str = "LOAN_WIZARD_API_URL";

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WizardConfig {
    /// Base URL of the remote application API
    pub api_base_url: Option<String>,
    /// Where drafts and logs are kept
    pub data_dir: Option<PathBuf>,
    /// Attempts per remote call
    pub max_attempts: Option<u32>,
    /// Linear backoff step between attempts, in milliseconds
    pub retry_backoff_ms: Option<u64>,
}

impl WizardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "loanwizard", "loan-wizard")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: WizardConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// API base URL from the environment, then the config file
    pub fn api_base_url(&self) -> Option<String> {
        self.resolve_api_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_base_url(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .into_iter()
            .chain(self.api_base_url.clone())
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .find(|url| !url.is_empty())
    }

    /// Data directory for drafts and logs, if one can be determined
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    /// Retry policy for remote calls
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            backoff_step: self
                .retry_backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.backoff_step),
        }
    }
}
