//! `/info` and the "Video info" message command.

use tracing::warn;
use ytinfo_core::message::{IncomingMessage, OutgoingMessage};
use ytinfo_core::settings::InfoLevel;
use ytinfo_i18n::Args;

use super::CommandContext;
use crate::format::{build_embed, EmbedStyle};
use crate::links::{extract_video_ids, parse_video_ref};

pub(super) async fn handle_info(
    ctx: &CommandContext<'_>,
    video: &str,
    level: Option<&str>,
) -> OutgoingMessage {
    let Some(id) = parse_video_ref(video) else {
        return ctx.private_reply(ctx.t("errors.no_links"));
    };
    let level = match level {
        None => ctx.settings.info_level,
        Some(raw) => match raw.parse::<InfoLevel>() {
            Ok(level) => level,
            Err(_) => {
                return ctx.private_reply(
                    ctx.t_with("settings.invalid_value", &Args::named([("value", raw)])),
                )
            }
        },
    };
    reply_with_videos(ctx, &[id], level).await
}

pub(super) async fn handle_video_info(
    ctx: &CommandContext<'_>,
    target: &IncomingMessage,
) -> OutgoingMessage {
    let ids = extract_video_ids(&target.content, ctx.replies.max_links_per_message);
    if ids.is_empty() {
        return ctx.private_reply(ctx.t("errors.no_links"));
    }
    reply_with_videos(ctx, &ids, ctx.settings.info_level).await
}

async fn reply_with_videos(
    ctx: &CommandContext<'_>,
    ids: &[String],
    level: InfoLevel,
) -> OutgoingMessage {
    let videos = match ctx.source.fetch(ids).await {
        Ok(videos) => videos,
        Err(e) => {
            warn!("video source {} failed for {ids:?}: {e}", ctx.source.name());
            return ctx.private_reply(ctx.t("errors.source_failed"));
        }
    };
    if videos.is_empty() {
        return ctx.private_reply(ctx.t("errors.not_found"));
    }

    let style = EmbedStyle {
        level,
        numbers: ctx.settings.number_format,
        language: ctx.language,
        color: ctx.replies.embed_color,
    };
    OutgoingMessage {
        channel_id: ctx.interaction.channel_id.clone(),
        embeds: videos
            .iter()
            .map(|v| build_embed(v, &style, ctx.translator))
            .collect(),
        ..Default::default()
    }
}
