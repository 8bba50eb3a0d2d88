//! Per-user overrides and the effective settings for a reply.

use super::{parse_column, parse_timestamp, Store};
use ytinfo_core::config::RepliesConfig;
use ytinfo_core::error::BotError;
use ytinfo_core::settings::{EffectiveSettings, UserSettings};

type UserRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<bool>,
    String,
);

impl Store {
    /// Stored overrides for a user, or `None` if they never set any.
    pub async fn get_user_settings(&self, user_id: &str) -> Result<Option<UserSettings>, BotError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT user_id, info_level, number_format, locale, auto_reply, updated_at \
             FROM user_settings WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BotError::Store(format!("query failed: {e}")))?;

        row.map(user_from_row).transpose()
    }

    /// Insert or replace a user's overrides. A user without overrides is removed.
    pub async fn save_user_settings(&self, settings: &UserSettings) -> Result<(), BotError> {
        if settings.is_empty() {
            self.delete_user_settings(&settings.user_id).await?;
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO user_settings (user_id, info_level, number_format, locale, auto_reply) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(user_id) DO UPDATE SET \
                info_level = excluded.info_level, \
                number_format = excluded.number_format, \
                locale = excluded.locale, \
                auto_reply = excluded.auto_reply, \
                updated_at = datetime('now')",
        )
        .bind(&settings.user_id)
        .bind(settings.info_level.map(|l| l.as_str()))
        .bind(settings.number_format.map(|f| f.as_str()))
        .bind(&settings.locale)
        .bind(settings.auto_reply)
        .execute(&self.pool)
        .await
        .map_err(|e| BotError::Store(format!("upsert user settings failed: {e}")))?;

        Ok(())
    }

    /// Forget a user's overrides. Returns `true` if a row was deleted.
    pub async fn delete_user_settings(&self, user_id: &str) -> Result<bool, BotError> {
        let result = sqlx::query("DELETE FROM user_settings WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| BotError::Store(format!("delete failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Settings that apply to `user_id` posting in `guild_id` (`None` for DMs).
    pub async fn effective_settings(
        &self,
        replies: &RepliesConfig,
        guild_id: Option<&str>,
        user_id: &str,
    ) -> Result<EffectiveSettings, BotError> {
        let guild = match guild_id {
            Some(id) => self.get_guild_settings(id).await?,
            None => None,
        };
        let user = self.get_user_settings(user_id).await?;
        Ok(EffectiveSettings::resolve(
            replies,
            guild.as_ref(),
            user.as_ref(),
        ))
    }
}

fn user_from_row(row: UserRow) -> Result<UserSettings, BotError> {
    let (user_id, info_level, number_format, locale, auto_reply, updated_at) = row;
    Ok(UserSettings {
        user_id,
        info_level: info_level
            .as_deref()
            .map(|v| parse_column("info_level", v))
            .transpose()?,
        number_format: number_format
            .as_deref()
            .map(|v| parse_column("number_format", v))
            .transpose()?,
        locale,
        auto_reply,
        updated_at: parse_timestamp(&updated_at),
    })
}
