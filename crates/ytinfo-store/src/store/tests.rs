use super::*;
use ytinfo_core::config::RepliesConfig;
use ytinfo_core::settings::{GuildSettings, InfoLevel, NumberFormat, UserSettings};

async fn test_store() -> Store {
    Store::in_memory().await.unwrap()
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let store = test_store().await;
    Store::run_migrations(store.pool()).await.unwrap();

    let (applied,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(applied, 2);
}

#[tokio::test]
async fn test_new_store_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        db_path: dir
            .path()
            .join("nested/settings.db")
            .to_string_lossy()
            .into_owned(),
    };
    let store = Store::new(&config).await.unwrap();
    assert_eq!(store.counts().await.unwrap(), (0, 0));
    assert!(dir.path().join("nested/settings.db").exists());
}

#[tokio::test]
async fn test_guild_settings_roundtrip() {
    let store = test_store().await;
    assert!(store.get_guild_settings("g1").await.unwrap().is_none());

    let mut settings = GuildSettings::defaults("g1", &RepliesConfig::default());
    settings.info_level = InfoLevel::Full;
    settings.number_format = NumberFormat::Raw;
    settings.locale = Some("de".to_string());
    settings.auto_reply = false;
    store.save_guild_settings(&settings).await.unwrap();

    let loaded = store.get_guild_settings("g1").await.unwrap().unwrap();
    assert_eq!(loaded.guild_id, "g1");
    assert_eq!(loaded.info_level, InfoLevel::Full);
    assert_eq!(loaded.number_format, NumberFormat::Raw);
    assert_eq!(loaded.locale.as_deref(), Some("de"));
    assert!(!loaded.auto_reply);
    assert!(loaded.updated_at.is_some());
}

#[tokio::test]
async fn test_guild_settings_upsert_overwrites() {
    let store = test_store().await;
    let mut settings = GuildSettings::defaults("g1", &RepliesConfig::default());
    store.save_guild_settings(&settings).await.unwrap();

    settings.info_level = InfoLevel::Compact;
    settings.locale = None;
    store.save_guild_settings(&settings).await.unwrap();

    let loaded = store.get_guild_settings("g1").await.unwrap().unwrap();
    assert_eq!(loaded.info_level, InfoLevel::Compact);
    assert!(loaded.locale.is_none());
    assert_eq!(store.counts().await.unwrap(), (1, 0));
}

#[tokio::test]
async fn test_delete_guild_settings() {
    let store = test_store().await;
    let settings = GuildSettings::defaults("g1", &RepliesConfig::default());
    store.save_guild_settings(&settings).await.unwrap();

    assert!(store.delete_guild_settings("g1").await.unwrap());
    assert!(!store.delete_guild_settings("g1").await.unwrap());
    assert!(store.get_guild_settings("g1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_settings_roundtrip() {
    let store = test_store().await;
    assert!(store.get_user_settings("u1").await.unwrap().is_none());

    let mut settings = UserSettings::new("u1");
    settings.number_format = Some(NumberFormat::Compact);
    settings.auto_reply = Some(false);
    store.save_user_settings(&settings).await.unwrap();

    let loaded = store.get_user_settings("u1").await.unwrap().unwrap();
    assert_eq!(loaded.info_level, None);
    assert_eq!(loaded.number_format, Some(NumberFormat::Compact));
    assert_eq!(loaded.locale, None);
    assert_eq!(loaded.auto_reply, Some(false));
}

#[tokio::test]
async fn test_saving_empty_user_settings_removes_row() {
    let store = test_store().await;
    let mut settings = UserSettings::new("u1");
    settings.locale = Some("es-ES".to_string());
    store.save_user_settings(&settings).await.unwrap();
    assert_eq!(store.counts().await.unwrap(), (0, 1));

    settings.locale = None;
    store.save_user_settings(&settings).await.unwrap();
    assert_eq!(store.counts().await.unwrap(), (0, 0));
    assert!(store.get_user_settings("u1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_column_is_reported() {
    let store = test_store().await;
    sqlx::query("INSERT INTO guild_settings (guild_id, info_level) VALUES ('g1', 'verbose')")
        .execute(store.pool())
        .await
        .unwrap();

    let err = store.get_guild_settings("g1").await.unwrap_err();
    assert!(err.to_string().contains("info_level"));
}

#[tokio::test]
async fn test_effective_settings_defaults() {
    let store = test_store().await;
    let replies = RepliesConfig::default();
    let eff = store.effective_settings(&replies, Some("g1"), "u1").await.unwrap();
    assert_eq!(eff.info_level, replies.info_level);
    assert_eq!(eff.number_format, replies.number_format);
    assert!(eff.locale.is_none());
    assert!(eff.auto_reply);
}

#[tokio::test]
async fn test_effective_settings_user_overrides_guild() {
    let store = test_store().await;
    let replies = RepliesConfig::default();

    let mut guild = GuildSettings::defaults("g1", &replies);
    guild.info_level = InfoLevel::Compact;
    guild.locale = Some("de".to_string());
    store.save_guild_settings(&guild).await.unwrap();

    let mut user = UserSettings::new("u1");
    user.locale = Some("es-ES".to_string());
    store.save_user_settings(&user).await.unwrap();

    let eff = store.effective_settings(&replies, Some("g1"), "u1").await.unwrap();
    assert_eq!(eff.info_level, InfoLevel::Compact);
    assert_eq!(eff.locale.as_deref(), Some("es-ES"));

    // Another user in the same guild sees the guild locale.
    let eff = store.effective_settings(&replies, Some("g1"), "u2").await.unwrap();
    assert_eq!(eff.locale.as_deref(), Some("de"));
}

#[tokio::test]
async fn test_effective_settings_in_dms_ignores_guilds() {
    let store = test_store().await;
    let replies = RepliesConfig::default();
    let mut guild = GuildSettings::defaults("g1", &replies);
    guild.auto_reply = false;
    store.save_guild_settings(&guild).await.unwrap();

    let eff = store.effective_settings(&replies, None, "u1").await.unwrap();
    assert!(eff.auto_reply);
}

#[test]
fn test_parse_timestamp() {
    let ts = parse_timestamp("2024-03-01 12:30:00").unwrap();
    assert_eq!(ts.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    assert!(parse_timestamp("yesterday").is_none());
}
