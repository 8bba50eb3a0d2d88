mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BotError;
use crate::settings::{InfoLevel, NumberFormat};
use defaults::*;

/// Top-level ytinfo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub replies: RepliesConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Directory holding one `<locale>.json` file per language.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    /// Language used when a caller does not name one.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Language consulted when a table or key is missing. Empty = no fallback.
    #[serde(default = "default_locale")]
    pub fallback_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales_dir: default_locales_dir(),
            default_locale: default_locale(),
            fallback_locale: default_locale(),
        }
    }
}

impl I18nConfig {
    /// The fallback locale, or `None` when disabled.
    pub fn fallback(&self) -> Option<&str> {
        let trimmed = self.fallback_locale.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Settings store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Reply behavior, and the defaults for guilds that never configured anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepliesConfig {
    /// Links beyond this count in one message are ignored.
    #[serde(default = "default_max_links")]
    pub max_links_per_message: usize,
    #[serde(default = "default_info_level")]
    pub info_level: InfoLevel,
    #[serde(default = "default_number_format")]
    pub number_format: NumberFormat,
    #[serde(default = "default_true")]
    pub auto_reply: bool,
    /// Embed accent color as `0xRRGGBB`.
    #[serde(default = "default_embed_color")]
    pub embed_color: u32,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            max_links_per_message: default_max_links(),
            info_level: default_info_level(),
            number_format: default_number_format(),
            auto_reply: true,
            embed_color: default_embed_color(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, BotError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, BotError> {
    let config: Config = toml::from_str(content)
        .map_err(|e| BotError::Config(format!("failed to parse config: {}", e)))?;

    if config.replies.max_links_per_message == 0 {
        return Err(BotError::Config(
            "replies.max_links_per_message must be at least 1".to_string(),
        ));
    }
    if config.i18n.default_locale.trim().is_empty() {
        return Err(BotError::Config(
            "i18n.default_locale must not be empty".to_string(),
        ));
    }

    Ok(config)
}
