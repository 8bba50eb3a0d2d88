//! Automatic replies to messages that link videos.

use tracing::{debug, warn};
use ytinfo_core::message::{IncomingMessage, OutgoingMessage};

use super::Gateway;
use crate::format::{build_embed, EmbedStyle};
use crate::links::extract_video_ids;
use crate::locale::pick_language;

impl Gateway {
    /// The embed reply for a message, or `None` when the bot stays quiet.
    ///
    /// Quiet for bot authors, messages without links, guilds or users that
    /// turned auto-replies off, and source failures.
    pub async fn reply_to_message(&self, message: &IncomingMessage) -> Option<OutgoingMessage> {
        if message.author_is_bot {
            return None;
        }
        let ids = extract_video_ids(&message.content, self.replies.max_links_per_message);
        if ids.is_empty() {
            return None;
        }

        let settings = self
            .settings_for(message.guild_id.as_deref(), &message.author_id)
            .await;
        if !settings.auto_reply {
            debug!("auto-reply off for message {}", message.id);
            return None;
        }

        let videos = match self.source.fetch(&ids).await {
            Ok(videos) => videos,
            Err(e) => {
                warn!("video source {} failed for {ids:?}: {e}", self.source.name());
                return None;
            }
        };
        if videos.is_empty() {
            debug!("no videos found for message {}", message.id);
            return None;
        }

        let language = pick_language(
            &self.translator,
            [settings.locale.as_deref(), message.guild_locale.as_deref()],
        );
        let style = EmbedStyle {
            level: settings.info_level,
            numbers: settings.number_format,
            language: &language,
            color: self.replies.embed_color,
        };

        Some(OutgoingMessage {
            channel_id: message.channel_id.clone(),
            reply_to: Some(message.id.clone()),
            embeds: videos
                .iter()
                .map(|v| build_embed(v, &style, &self.translator))
                .collect(),
            ..Default::default()
        })
    }
}
