//! `/settings server …` and `/settings me …`.

use tracing::{info, warn};
use ytinfo_core::error::BotError;
use ytinfo_core::message::{Embed, EmbedField, OutgoingMessage};
use ytinfo_core::settings::{GuildSettings, InfoLevel, NumberFormat, UserSettings};
use ytinfo_i18n::Args;

use super::{CommandContext, Scope, SettingsAction};
use crate::locale::match_language;

/// A validated change to one setting.
enum Change {
    InfoLevel(InfoLevel),
    NumberFormat(NumberFormat),
    Locale(String),
    AutoReply(bool),
}

pub(super) async fn handle_settings(
    ctx: &CommandContext<'_>,
    scope: Scope,
    action: SettingsAction,
) -> OutgoingMessage {
    let result = match scope {
        Scope::Guild => guild_settings(ctx, action).await,
        Scope::User => user_settings(ctx, action).await,
    };
    result.unwrap_or_else(|e| {
        warn!("settings command failed: {e}");
        ctx.private_reply(ctx.t("errors.store_failed"))
    })
}

async fn guild_settings(
    ctx: &CommandContext<'_>,
    action: SettingsAction,
) -> Result<OutgoingMessage, BotError> {
    let Some(guild_id) = ctx.interaction.guild_id.as_deref() else {
        return Ok(ctx.private_reply(ctx.t("settings.guild_only")));
    };
    if action != SettingsAction::Show && !ctx.interaction.is_admin {
        return Ok(ctx.private_reply(ctx.t("settings.admin_only")));
    }

    let mut settings = ctx
        .store
        .get_guild_settings(guild_id)
        .await?
        .unwrap_or_else(|| GuildSettings::defaults(guild_id, ctx.replies));

    let change = match action {
        SettingsAction::Show => return Ok(show_guild(ctx, &settings)),
        SettingsAction::Reset { confirm } => {
            let scope = ctx.t("settings.scope_guild");
            if !confirm {
                return Ok(confirm_reset(ctx, &scope));
            }
            let removed = ctx.store.delete_guild_settings(guild_id).await?;
            if removed {
                info!("settings: guild {guild_id} reset");
            }
            return Ok(reset_result(ctx, &scope, removed));
        }
        other => match validate(ctx, other) {
            Ok(change) => change,
            Err(reply) => return Ok(reply),
        },
    };

    match &change {
        Change::InfoLevel(level) => settings.info_level = *level,
        Change::NumberFormat(format) => settings.number_format = *format,
        Change::Locale(code) => settings.locale = Some(code.clone()),
        Change::AutoReply(enabled) => settings.auto_reply = *enabled,
    }
    ctx.store.save_guild_settings(&settings).await?;
    info!("settings: guild {guild_id} updated by {}", ctx.interaction.user_id);
    Ok(saved(ctx, &change))
}

async fn user_settings(
    ctx: &CommandContext<'_>,
    action: SettingsAction,
) -> Result<OutgoingMessage, BotError> {
    let user_id = ctx.interaction.user_id.as_str();
    let mut settings = ctx
        .store
        .get_user_settings(user_id)
        .await?
        .unwrap_or_else(|| UserSettings::new(user_id));

    let change = match action {
        SettingsAction::Show => return Ok(show_user(ctx, &settings)),
        SettingsAction::Reset { confirm } => {
            let scope = ctx.t("settings.scope_user");
            if !confirm {
                return Ok(confirm_reset(ctx, &scope));
            }
            let removed = ctx.store.delete_user_settings(user_id).await?;
            return Ok(reset_result(ctx, &scope, removed));
        }
        other => match validate(ctx, other) {
            Ok(change) => change,
            Err(reply) => return Ok(reply),
        },
    };

    match &change {
        Change::InfoLevel(level) => settings.info_level = Some(*level),
        Change::NumberFormat(format) => settings.number_format = Some(*format),
        Change::Locale(code) => settings.locale = Some(code.clone()),
        Change::AutoReply(enabled) => settings.auto_reply = Some(*enabled),
    }
    ctx.store.save_user_settings(&settings).await?;
    Ok(saved(ctx, &change))
}

/// Turn a raw action into a change, or the reply explaining why not.
fn validate(ctx: &CommandContext<'_>, action: SettingsAction) -> Result<Change, OutgoingMessage> {
    let invalid = |value: &str| {
        ctx.private_reply(ctx.t_with("settings.invalid_value", &Args::named([("value", value)])))
    };
    match action {
        SettingsAction::InfoLevel(raw) => raw
            .parse()
            .map(Change::InfoLevel)
            .map_err(|_| invalid(&raw)),
        SettingsAction::NumberFormat(raw) => raw
            .parse()
            .map(Change::NumberFormat)
            .map_err(|_| invalid(&raw)),
        SettingsAction::Locale(raw) => match match_language(ctx.translator, &raw) {
            Some(code) => Ok(Change::Locale(code)),
            None => Err(ctx.private_reply(ctx.t_with(
                "settings.unknown_locale",
                &Args::named([
                    ("value", raw.clone()),
                    ("available", ctx.translator.languages().join(", ")),
                ]),
            ))),
        },
        SettingsAction::AutoReply(enabled) => Ok(Change::AutoReply(enabled)),
        SettingsAction::Show | SettingsAction::Reset { .. } => Err(invalid("")),
    }
}

fn saved(ctx: &CommandContext<'_>, change: &Change) -> OutgoingMessage {
    let (setting, value) = match change {
        Change::InfoLevel(level) => ("settings.info_level", info_level_label(ctx, *level)),
        Change::NumberFormat(format) => (
            "settings.number_format",
            number_format_label(ctx, *format),
        ),
        Change::Locale(code) => ("settings.locale", locale_label(ctx, code)),
        Change::AutoReply(enabled) => ("settings.auto_reply", on_off(ctx, *enabled)),
    };
    ctx.private_reply(ctx.t_with(
        "settings.saved",
        &Args::named([("setting", ctx.t(setting)), ("value", value)]),
    ))
}

fn confirm_reset(ctx: &CommandContext<'_>, scope: &str) -> OutgoingMessage {
    ctx.private_reply(ctx.t_with("settings.reset_confirm", &Args::named([("scope", scope)])))
}

fn reset_result(ctx: &CommandContext<'_>, scope: &str, removed: bool) -> OutgoingMessage {
    if removed {
        ctx.private_reply(ctx.t_with("settings.reset_done", &Args::named([("scope", scope)])))
    } else {
        ctx.private_reply(ctx.t("settings.nothing_to_reset"))
    }
}

// --- Display ---

fn info_level_label(ctx: &CommandContext<'_>, level: InfoLevel) -> String {
    ctx.t(&format!("choices.info_level.{}", level.as_str()))
}

fn number_format_label(ctx: &CommandContext<'_>, format: NumberFormat) -> String {
    ctx.t(&format!("choices.number_format.{}", format.as_str()))
}

/// A language named in itself, with its code.
fn locale_label(ctx: &CommandContext<'_>, code: &str) -> String {
    format!("{} ({code})", ctx.translator.t(code, "language_name"))
}

fn on_off(ctx: &CommandContext<'_>, enabled: bool) -> String {
    ctx.t(if enabled { "settings.on" } else { "settings.off" })
}

fn settings_embed(ctx: &CommandContext<'_>, title_key: &str, values: [Option<String>; 4]) -> Embed {
    let names = [
        "settings.info_level",
        "settings.number_format",
        "settings.locale",
        "settings.auto_reply",
    ];
    Embed {
        title: Some(ctx.t(title_key)),
        color: Some(ctx.replies.embed_color),
        fields: names
            .iter()
            .zip(values)
            .map(|(name, value)| EmbedField {
                name: ctx.t(name),
                value: value.unwrap_or_else(|| ctx.t("settings.not_set")),
                inline: true,
            })
            .collect(),
        ..Default::default()
    }
}

fn show_guild(ctx: &CommandContext<'_>, settings: &GuildSettings) -> OutgoingMessage {
    let embed = settings_embed(
        ctx,
        "settings.scope_guild",
        [
            Some(info_level_label(ctx, settings.info_level)),
            Some(number_format_label(ctx, settings.number_format)),
            settings.locale.as_deref().map(|code| locale_label(ctx, code)),
            Some(on_off(ctx, settings.auto_reply)),
        ],
    );
    OutgoingMessage {
        embeds: vec![embed],
        ephemeral: true,
        channel_id: ctx.interaction.channel_id.clone(),
        ..Default::default()
    }
}

fn show_user(ctx: &CommandContext<'_>, settings: &UserSettings) -> OutgoingMessage {
    let embed = settings_embed(
        ctx,
        "settings.scope_user",
        [
            settings.info_level.map(|l| info_level_label(ctx, l)),
            settings.number_format.map(|f| number_format_label(ctx, f)),
            settings.locale.as_deref().map(|code| locale_label(ctx, code)),
            settings.auto_reply.map(|enabled| on_off(ctx, enabled)),
        ],
    );
    OutgoingMessage {
        embeds: vec![embed],
        ephemeral: true,
        channel_id: ctx.interaction.channel_id.clone(),
        ..Default::default()
    }
}
