//! Persistent CLI configuration.
//!
//! Stored as `config.json` in the platform config directory (or in
//! `$SNOO_CONFIG_DIR`). Changes are written only by an explicit `save()`.
//! The access token is read from the environment and never stored.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use snoo_core::{AccessToken, ApiUrl};
use snoo_http::HttpConfig;

/// Overrides the directory holding `config.json`.
pub const CONFIG_DIR_ENV: &str = "SNOO_CONFIG_DIR";

/// Overrides the stored base URL.
pub const BASE_URL_ENV: &str = "SNOO_BASE_URL";

/// Bearer token for the OAuth host.
pub const ACCESS_TOKEN_ENV: &str = "SNOO_ACCESS_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("", "", "snoo")
            .context("Could not determine config directory")?
            .config_dir()
            .to_path_buf(),
    };
    Ok(dir.join("config.json"))
}

impl Config {
    /// Load the config, or the defaults if none has been saved.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = fs::read_to_string(&path).context("Failed to read config file")?;
        let config = serde_json::from_str(&json).context("Invalid config file")?;
        Ok(config)
    }

    /// Write the config to disk.
    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).context("Failed to write config file")?;
        Ok(path)
    }

    /// Base URL after the environment override.
    pub fn effective_base_url(&self) -> Option<String> {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.base_url.clone())
    }

    /// Transport settings from this config and the environment.
    pub fn http_config(&self) -> Result<HttpConfig> {
        let token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(AccessToken::new);

        let mut http = match token {
            Some(token) => HttpConfig::oauth(token),
            None => HttpConfig::default(),
        };

        if let Some(url) = self.effective_base_url() {
            let url = ApiUrl::new(&url).with_context(|| format!("Invalid base URL '{}'", url))?;
            http = http.base_url(url);
        }
        if let Some(ref agent) = self.user_agent {
            http = http.user_agent(agent.clone());
        }

        Ok(http)
    }
}
