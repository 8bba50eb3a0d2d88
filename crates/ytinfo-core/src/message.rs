use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something a channel delivers to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChannelEvent {
    Message(IncomingMessage),
    Interaction(Interaction),
}

/// A chat message seen by the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Platform message ID (snowflake).
    pub id: String,
    pub channel_id: String,
    /// `None` for direct messages.
    pub guild_id: Option<String>,
    pub author_id: String,
    /// Messages from bots (including ourselves) are never answered.
    #[serde(default)]
    pub author_is_bot: bool,
    pub content: String,
    /// The guild's preferred locale as reported by the platform.
    #[serde(default)]
    pub guild_locale: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A slash command or context-menu invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub channel_id: String,
    pub guild_id: Option<String>,
    pub user_id: String,
    /// The invoking user's client locale.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub guild_locale: Option<String>,
    /// Whether the invoking member may manage the guild.
    #[serde(default)]
    pub is_admin: bool,
    pub data: InteractionData,
}

/// What was invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InteractionData {
    /// A chat-input command. `path` is the command name followed by any
    /// subcommand group and subcommand, e.g. `["settings", "guild", "locale"]`.
    Command {
        path: Vec<String>,
        #[serde(default)]
        options: Vec<CommandArg>,
    },
    /// A message context-menu command, invoked on `target`.
    MessageCommand {
        name: String,
        target: IncomingMessage,
    },
}

/// One resolved command option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    pub value: ArgValue,
}

/// A command option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl InteractionData {
    /// Look up an option by name.
    pub fn option(&self, name: &str) -> Option<&ArgValue> {
        match self {
            Self::Command { options, .. } => {
                options.iter().find(|o| o.name == name).map(|o| &o.value)
            }
            Self::MessageCommand { .. } => None,
        }
    }

    pub fn string_option(&self, name: &str) -> Option<&str> {
        match self.option(name)? {
            ArgValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn bool_option(&self, name: &str) -> Option<bool> {
        match self.option(name)? {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// A reply to send back through a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub channel_id: String,
    /// Message being replied to, if any.
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    /// Only visible to the invoking user (interaction responses only).
    #[serde(default)]
    pub ephemeral: bool,
}

impl OutgoingMessage {
    /// A plain-text reply.
    pub fn text(channel_id: &str, content: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

/// Platform-neutral rich embed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub author: Option<EmbedAuthor>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}
