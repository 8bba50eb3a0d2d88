//! Guild settings.

use super::{parse_column, parse_timestamp, Store};
use ytinfo_core::error::BotError;
use ytinfo_core::settings::GuildSettings;

type GuildRow = (String, String, String, Option<String>, bool, String);

impl Store {
    /// Stored settings for a guild, or `None` if it never configured anything.
    pub async fn get_guild_settings(
        &self,
        guild_id: &str,
    ) -> Result<Option<GuildSettings>, BotError> {
        let row: Option<GuildRow> = sqlx::query_as(
            "SELECT guild_id, info_level, number_format, locale, auto_reply, updated_at \
             FROM guild_settings WHERE guild_id = ?",
        )
        .bind(guild_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BotError::Store(format!("query failed: {e}")))?;

        row.map(guild_from_row).transpose()
    }

    /// Insert or replace a guild's settings.
    pub async fn save_guild_settings(&self, settings: &GuildSettings) -> Result<(), BotError> {
        sqlx::query(
            "INSERT INTO guild_settings (guild_id, info_level, number_format, locale, auto_reply) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(guild_id) DO UPDATE SET \
                info_level = excluded.info_level, \
                number_format = excluded.number_format, \
                locale = excluded.locale, \
                auto_reply = excluded.auto_reply, \
                updated_at = datetime('now')",
        )
        .bind(&settings.guild_id)
        .bind(settings.info_level.as_str())
        .bind(settings.number_format.as_str())
        .bind(&settings.locale)
        .bind(settings.auto_reply)
        .execute(&self.pool)
        .await
        .map_err(|e| BotError::Store(format!("upsert guild settings failed: {e}")))?;

        Ok(())
    }

    /// Forget a guild's settings. Returns `true` if a row was deleted.
    pub async fn delete_guild_settings(&self, guild_id: &str) -> Result<bool, BotError> {
        let result = sqlx::query("DELETE FROM guild_settings WHERE guild_id = ?")
            .bind(guild_id)
            .execute(&self.pool)
            .await
            .map_err(|e| BotError::Store(format!("delete failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn guild_from_row(row: GuildRow) -> Result<GuildSettings, BotError> {
    let (guild_id, info_level, number_format, locale, auto_reply, updated_at) = row;
    Ok(GuildSettings {
        guild_id,
        info_level: parse_column("info_level", &info_level)?,
        number_format: parse_column("number_format", &number_format)?,
        locale,
        auto_reply,
        updated_at: parse_timestamp(&updated_at),
    })
}
