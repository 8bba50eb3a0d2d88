//! Guild and user settings, and how they combine into the settings a reply uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::RepliesConfig;

/// How much of a video's metadata goes into a reply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoLevel {
    /// Title, channel and duration only.
    Compact,
    /// Adds view/like counts and publish date (default).
    #[default]
    Standard,
    /// Adds comments, description excerpt and tags.
    Full,
}

impl InfoLevel {
    pub const ALL: [InfoLevel; 3] = [Self::Compact, Self::Standard, Self::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Full => "full",
        }
    }
}

impl FromStr for InfoLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "standard" => Ok(Self::Standard),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown info level: {other}")),
        }
    }
}

impl fmt::Display for InfoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How counts (views, likes, comments) are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Digits grouped with the locale's separator, e.g. `1,234,567`.
    #[default]
    Grouped,
    /// Abbreviated with the locale's suffixes, e.g. `1.2M`.
    Compact,
    /// Plain digits, e.g. `1234567`.
    Raw,
}

impl NumberFormat {
    pub const ALL: [NumberFormat; 3] = [Self::Grouped, Self::Compact, Self::Raw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grouped => "grouped",
            Self::Compact => "compact",
            Self::Raw => "raw",
        }
    }
}

impl FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grouped" => Ok(Self::Grouped),
            "compact" => Ok(Self::Compact),
            "raw" => Ok(Self::Raw),
            other => Err(format!("unknown number format: {other}")),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings a guild admin controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSettings {
    pub guild_id: String,
    pub info_level: InfoLevel,
    pub number_format: NumberFormat,
    /// Locale override for replies in this guild. `None` = use the platform locale.
    pub locale: Option<String>,
    /// Whether links posted in this guild get automatic replies.
    pub auto_reply: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl GuildSettings {
    /// Settings for a guild that has never configured anything.
    pub fn defaults(guild_id: &str, replies: &RepliesConfig) -> Self {
        Self {
            guild_id: guild_id.to_string(),
            info_level: replies.info_level,
            number_format: replies.number_format,
            locale: None,
            auto_reply: replies.auto_reply,
            updated_at: None,
        }
    }
}

/// Per-user overrides. Every field is optional; `None` defers to the guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    pub info_level: Option<InfoLevel>,
    pub number_format: Option<NumberFormat>,
    pub locale: Option<String>,
    /// `Some(false)` opts the user out of automatic replies.
    pub auto_reply: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserSettings {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    /// True when the user has no overrides at all.
    pub fn is_empty(&self) -> bool {
        self.info_level.is_none()
            && self.number_format.is_none()
            && self.locale.is_none()
            && self.auto_reply.is_none()
    }
}

/// The settings that actually apply to one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveSettings {
    pub info_level: InfoLevel,
    pub number_format: NumberFormat,
    /// Locale override from the user or the guild, if any.
    pub locale: Option<String>,
    pub auto_reply: bool,
}

impl EffectiveSettings {
    /// Combine config defaults, guild settings and user overrides.
    ///
    /// User overrides win over the guild, the guild wins over config. Automatic
    /// replies need the guild flag on and no user opt-out.
    pub fn resolve(
        replies: &RepliesConfig,
        guild: Option<&GuildSettings>,
        user: Option<&UserSettings>,
    ) -> Self {
        let mut out = Self {
            info_level: replies.info_level,
            number_format: replies.number_format,
            locale: None,
            auto_reply: replies.auto_reply,
        };

        if let Some(g) = guild {
            out.info_level = g.info_level;
            out.number_format = g.number_format;
            out.locale = g.locale.clone();
            out.auto_reply = g.auto_reply;
        }

        if let Some(u) = user {
            if let Some(level) = u.info_level {
                out.info_level = level;
            }
            if let Some(format) = u.number_format {
                out.number_format = format;
            }
            if u.locale.is_some() {
                out.locale = u.locale.clone();
            }
            if u.auto_reply == Some(false) {
                out.auto_reply = false;
            }
        }

        out
    }
}
