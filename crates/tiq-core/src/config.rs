use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Default classification-service address when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Classification service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

/// Remote ticket store settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

/// Fully resolved settings: file values with env overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub api_url: String,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
}

/// Load the user config file, or defaults when it does not exist.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_config_file(&config_dir.join("tiq/config.toml"))
}

fn load_config_file(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve effective settings: env beats file beats default.
#[must_use]
pub fn resolve_config(file: &UserConfig) -> EffectiveConfig {
    resolve_config_inner(
        file,
        env::var("TIQ_API_URL").ok(),
        env::var("TIQ_STORE_URL").ok(),
        env::var("TIQ_STORE_KEY").ok(),
    )
}

fn resolve_config_inner(
    file: &UserConfig,
    env_api_url: Option<String>,
    env_store_url: Option<String>,
    env_store_key: Option<String>,
) -> EffectiveConfig {
    EffectiveConfig {
        api_url: env_api_url.unwrap_or_else(|| file.api.url.clone()),
        store_url: env_store_url.or_else(|| file.store.url.clone()),
        store_key: env_store_key.or_else(|| file.store.key.clone()),
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
