//! Default value functions used by serde for config deserialization.

use crate::settings::{InfoLevel, NumberFormat};

pub fn default_name() -> String {
    "ytinfo".to_string()
}

pub fn default_data_dir() -> String {
    "~/.ytinfo".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_locales_dir() -> String {
    "~/.ytinfo/locales".to_string()
}

pub fn default_locale() -> String {
    "en-US".to_string()
}

pub fn default_db_path() -> String {
    "~/.ytinfo/data/settings.db".to_string()
}

pub fn default_max_links() -> usize {
    5
}

pub fn default_info_level() -> InfoLevel {
    InfoLevel::Standard
}

pub fn default_number_format() -> NumberFormat {
    NumberFormat::Grouped
}

pub fn default_embed_color() -> u32 {
    0xFF0033
}
