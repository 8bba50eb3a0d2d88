use super::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn table(value: serde_json::Value) -> TranslationTable {
    TranslationTable::from_value(value).unwrap()
}

fn english() -> Translator {
    let mut tr = Translator::with_placeholders("en-US");
    tr.set_table(
        "en-US",
        table(json!({
            "x": "hello",
            "greet": "Hello, ${name}!",
            "greet2": "Hi ${a} and ${b}",
            "a": { "b": { "c": "deep" } },
            "menu.title": "flat title",
            "count": "${n} of ${total}"
        })),
    );
    tr
}

// --- Resolution ---

#[test]
fn test_unknown_key_returns_key() {
    let tr = english();
    assert_eq!(tr.resolve(None, "no.such.key", &Args::none()), "no.such.key");
    assert_eq!(tr.t("en-US", "nope"), "nope");
}

#[test]
fn test_unknown_language_without_fallback_returns_key() {
    let tr = english();
    assert_eq!(tr.t("fr", "x"), "x");
}

#[test]
fn test_nested_lookup() {
    let tr = english();
    assert_eq!(tr.t("en-US", "a.b.c"), "deep");
}

#[test]
fn test_nested_path_to_table_is_not_a_value() {
    let tr = english();
    assert_eq!(tr.t("en-US", "a.b"), "a.b");
}

#[test]
fn test_path_through_leaf_fails() {
    let tr = english();
    assert_eq!(tr.t("en-US", "x.y"), "x.y");
}

#[test]
fn test_flat_key_fallback() {
    let tr = english();
    assert_eq!(tr.t("en-US", "menu.title"), "flat title");
}

#[test]
fn test_nested_wins_over_flat() {
    let mut tr = Translator::new("en-US");
    tr.set_table(
        "en-US",
        table(json!({
            "a.b": "flat",
            "a": { "b": "nested" }
        })),
    );
    assert_eq!(tr.t("en-US", "a.b"), "nested");
}

#[test]
fn test_active_language_used_when_none_given() {
    let mut tr = english();
    tr.set_table("de", table(json!({ "x": "hallo" })));
    assert_eq!(tr.resolve(None, "x", &Args::none()), "hello");
    tr.set_active("de");
    assert_eq!(tr.active(), "de");
    assert_eq!(tr.resolve(None, "x", &Args::none()), "hallo");
}

#[test]
fn test_fallback_for_missing_table() {
    let mut tr = english();
    tr.set_fallback(Some("en-US"));
    assert_eq!(tr.t("fr", "x"), "hello");
}

#[test]
fn test_fallback_for_missing_key() {
    let mut tr = english();
    tr.set_table("de", table(json!({ "other": "anders" })));
    tr.set_fallback(Some("en-US"));
    assert_eq!(tr.t("de", "x"), "hello");
    assert_eq!(tr.t("de", "other"), "anders");
}

#[test]
fn test_fallback_missing_too_returns_key() {
    let mut tr = english();
    tr.set_fallback(Some("en-US"));
    assert_eq!(tr.t("fr", "missing"), "missing");
    tr.set_fallback(Some("ja"));
    assert_eq!(tr.t("fr", "x"), "x");
}

#[test]
fn test_fallback_cleared() {
    let mut tr = english();
    tr.set_fallback(Some("en-US"));
    assert_eq!(tr.fallback(), Some("en-US"));
    tr.set_fallback(None);
    assert_eq!(tr.fallback(), None);
    assert_eq!(tr.t("fr", "x"), "x");
}

// --- Substitution ---

#[test]
fn test_named_substitution() {
    let tr = english();
    let out = tr.t_with("en-US", "greet", &Args::named([("name", "Ada")]));
    assert_eq!(out, "Hello, Ada!");
}

#[test]
fn test_positional_substitution() {
    let tr = english();
    let out = tr.t_with("en-US", "greet2", &Args::positional(["Ada", "Grace"]));
    assert_eq!(out, "Hi Ada and Grace");
}

#[test]
fn test_positional_stops_when_args_run_out() {
    let tr = english();
    let out = tr.t_with("en-US", "greet2", &Args::positional(["Ada"]));
    assert_eq!(out, "Hi Ada and ${b}");
}

#[test]
fn test_no_args_leaves_placeholders() {
    let tr = english();
    assert_eq!(tr.t("en-US", "greet"), "Hello, ${name}!");
}

#[test]
fn test_positional_object_sniffed_as_named() {
    let tr = english();
    let args = Args::Positional(vec![json!({ "name": "Ada" })]);
    assert_eq!(tr.t_with("en-US", "greet", &args), "Hello, Ada!");
}

#[test]
fn test_partial_mapping_falls_back_to_positional() {
    let tr = english();
    let args = Args::named([("a", "Ada")]);
    assert_eq!(
        tr.t_with("en-US", "greet2", &args),
        r#"Hi {"a":"Ada"} and ${b}"#
    );
}

#[test]
fn test_non_string_values_substitute_as_json() {
    let tr = english();
    let args = Args::named([("n", json!(3)), ("total", json!(10))]);
    assert_eq!(tr.t_with("en-US", "count", &args), "3 of 10");
    let args = Args::positional([json!(true), json!(null)]);
    assert_eq!(tr.t_with("en-US", "count", &args), "true of null");
}

#[test]
fn test_repeated_placeholder_named() {
    let mut tr = Translator::with_placeholders("en-US");
    tr.set_table("en-US", table(json!({ "echo": "${w} ${w} ${w}" })));
    let out = tr.t_with("en-US", "echo", &Args::named([("w", "hey")]));
    assert_eq!(out, "hey hey hey");
}

// --- Transform pipeline ---

#[test]
fn test_no_matching_transform_is_identity() {
    let tr = english();
    let out = tr.apply_transforms("en-US", "k", "plain text", &Args::positional(["x"]));
    assert_eq!(out, "plain text");
}

#[test]
fn test_transforms_run_in_registration_order() {
    let mut tr = english();
    tr.add_transform("!", |ctx| format!("{}?", ctx.current)).unwrap();
    tr.add_transform("Hello", |ctx| ctx.current.to_uppercase())
        .unwrap();
    let out = tr.t_with("en-US", "greet", &Args::named([("name", "Ada")]));
    assert_eq!(out, "HELLO, ADA!?");
}

#[test]
fn test_transform_sees_raw_matches_and_context() {
    let seen: Arc<Mutex<Vec<(String, String, String, usize)>>> = Arc::default();
    let sink = seen.clone();
    let mut tr = Translator::new("en-US");
    tr.set_table("en-US", table(json!({ "k": "a1 b22 c333" })));
    tr.add_transform(r"[a-z](\d+)", move |ctx| {
        sink.lock().unwrap().push((
            ctx.language.to_string(),
            ctx.key.to_string(),
            ctx.raw.to_string(),
            ctx.matches.len(),
        ));
        let digits: Vec<&str> = ctx
            .matches
            .iter()
            .filter_map(|m| m.groups[0].as_deref())
            .collect();
        digits.join("+")
    })
    .unwrap();

    assert_eq!(tr.t("en-US", "k"), "1+22+333");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (language, key, raw, count) = &seen[0];
    assert_eq!(language, "en-US");
    assert_eq!(key, "k");
    assert_eq!(raw, "a1 b22 c333");
    assert_eq!(*count, 3);
}

#[test]
fn test_transform_receives_supplying_language() {
    let mut tr = Translator::new("de");
    tr.set_table("en-US", table(json!({ "k": "#" })));
    tr.set_fallback(Some("en-US"));
    tr.add_transform("#", |ctx| ctx.language.to_string()).unwrap();
    assert_eq!(tr.t("de", "k"), "en-US");
}

#[test]
fn test_match_positions_and_adjacent_duplicates() {
    let mut tr = Translator::new("en-US");
    tr.set_table("en-US", table(json!({ "k": "aaaa" })));
    tr.add_transform("aa", |ctx| {
        ctx.matches
            .iter()
            .map(|m| m.start.to_string())
            .collect::<Vec<_>>()
            .join(",")
    })
    .unwrap();
    assert_eq!(tr.t("en-US", "k"), "0,2");
}

#[test]
fn test_transform_pattern_is_multiline() {
    let mut tr = Translator::new("en-US");
    tr.set_table("en-US", table(json!({ "k": "one\ntwo" })));
    tr.add_transform("^two$", |_| "matched".to_string()).unwrap();
    assert_eq!(tr.t("en-US", "k"), "matched");
}

#[test]
fn test_invalid_pattern_rejected() {
    let mut tr = Translator::new("en-US");
    assert!(tr.add_transform("(unclosed", |ctx| ctx.current.into()).is_err());
    assert_eq!(tr.transform_count(), 0);
}

#[test]
fn test_remove_transform_by_id() {
    let mut tr = english();
    let id = tr.add_transform("Hello", |_| "bye".to_string()).unwrap();
    assert_eq!(tr.t("en-US", "greet"), "bye");
    assert!(tr.remove_transform(id));
    assert!(!tr.remove_transform(id));
    assert_eq!(tr.t("en-US", "greet"), "Hello, ${name}!");
}

#[test]
fn test_remove_transform_by_pattern_removes_one() {
    let mut tr = Translator::new("en-US");
    tr.set_table("en-US", table(json!({ "k": "x" })));
    tr.add_transform("x", |ctx| format!("{}1", ctx.current)).unwrap();
    tr.add_transform("x", |ctx| format!("{}2", ctx.current)).unwrap();
    assert_eq!(tr.t("en-US", "k"), "x12");

    assert!(tr.remove_transform("x"));
    assert_eq!(tr.transform_count(), 1);
    assert_eq!(tr.t("en-US", "k"), "x2");

    let re = regex::Regex::new("x").unwrap();
    assert!(tr.remove_transform(&re));
    assert!(!tr.remove_transform("x"));
    assert_eq!(tr.t("en-US", "k"), "x");
}

#[test]
fn test_remove_placeholder_transform() {
    let mut tr = english();
    assert!(tr.remove_transform(PLACEHOLDER_PATTERN));
    let out = tr.t_with("en-US", "greet", &Args::named([("name", "Ada")]));
    assert_eq!(out, "Hello, ${name}!");
}

// --- Registry ---

#[test]
fn test_set_table_replaces_wholesale() {
    let mut tr = english();
    let previous = tr.set_table("en-US", table(json!({ "y": "why" })));
    assert!(previous.is_some());
    assert_eq!(tr.t("en-US", "x"), "x");
    assert_eq!(tr.t("en-US", "y"), "why");
}

#[test]
fn test_table_defaults_to_active() {
    let tr = english();
    assert!(tr.table(None).is_some());
    assert!(tr.table(Some("fr")).is_none());
}

#[test]
fn test_delete_table() {
    let mut tr = english();
    assert!(tr.delete_table("en-US").is_some());
    assert!(tr.delete_table("en-US").is_none());
    assert!(tr.languages().is_empty());
    assert_eq!(tr.t("en-US", "x"), "x");
}

#[test]
fn test_has_key() {
    let mut tr = english();
    assert!(tr.has_key("x", None));
    assert!(tr.has_key("a.b.c", Some("en-US")));
    assert!(!tr.has_key("missing.key", None));
    assert!(!tr.has_key("x", Some("fr")));
    tr.set_fallback(Some("en-US"));
    assert!(tr.has_key("x", Some("fr")));
}

#[test]
fn test_has_key_self_translation_is_ambiguous() {
    let mut tr = Translator::new("en-US");
    tr.set_table("en-US", table(json!({ "ok": "ok" })));
    assert!(!tr.has_key("ok", None));
}

#[test]
fn test_languages_sorted() {
    let mut tr = english();
    tr.set_table("de", table(json!({})));
    tr.set_table("es-ES", table(json!({})));
    assert_eq!(tr.languages(), vec!["de", "en-US", "es-ES"]);
    assert!(tr.supports("de"));
    assert!(!tr.supports("fr"));
}

#[test]
fn test_missing_keys_against_fallback() {
    let mut tr = english();
    tr.set_fallback(Some("en-US"));
    tr.set_table("de", table(json!({ "x": "hallo", "a": { "b": { "c": "tief" } } })));
    let missing = tr.missing_keys("de");
    assert!(missing.contains(&"greet".to_string()));
    assert!(missing.contains(&"menu.title".to_string()));
    assert!(!missing.contains(&"x".to_string()));
    assert!(!missing.contains(&"a.b.c".to_string()));
}

// --- Localization maps ---

#[test]
fn test_localization_map_per_language() {
    let mut tr = Translator::with_placeholders("en-US");
    tr.set_fallback(Some("en-US"));
    tr.set_table("en-US", table(json!({ "cmd": { "name": "info" } })));
    tr.set_table("de", table(json!({ "cmd": { "name": "infos" } })));
    tr.set_table("es-ES", table(json!({ "other": "x" })));

    let map = tr.localization_map("cmd.name", None);
    assert_eq!(map.len(), 2, "no fallback chaining per language");
    assert_eq!(map["en-US"], "info");
    assert_eq!(map["de"], "infos");
}

#[test]
fn test_localization_map_prefix_and_transforms() {
    let mut tr = Translator::with_placeholders("en-US");
    tr.set_table("en-US", table(json!({ "d": "Shows ${thing}" })));
    tr.add_transform("Shows", |ctx| ctx.current.replace("Shows", "Lists"))
        .unwrap();
    let map = tr.localization_map("d", Some("» "));
    assert_eq!(map["en-US"], "» Lists ${thing}");
}

#[test]
fn test_localization_map_never_empty() {
    let mut tr = english();
    let map = tr.localization_map("missing.key", None);
    assert_eq!(map.len(), 1);
    assert_eq!(map["en-US"], "missing.key");

    tr.set_fallback(Some("de"));
    let map = tr.localization_map("missing.key", Some("ignored "));
    assert_eq!(map.get("de").map(String::as_str), Some("missing.key"));

    let empty = Translator::new("ja");
    assert_eq!(empty.localization_map("k", None)["ja"], "k");
}

// --- Tables ---

#[test]
fn test_table_rejects_non_object() {
    assert!(TranslationTable::from_json("[1, 2]").is_err());
    assert!(TranslationTable::from_json("\"text\"").is_err());
    assert!(TranslationTable::from_json("{ broken").is_err());
}

#[test]
fn test_table_keys_skip_non_strings() {
    let t = table(json!({
        "a": "1",
        "b": { "c": "2", "n": 5 },
        "list": ["x"]
    }));
    assert_eq!(t.keys(), vec!["a".to_string(), "b.c".to_string()]);
    assert_eq!(t.len(), 2);
    assert_eq!(t.lookup("b.n"), None);
}

// --- Loading ---

#[test]
fn test_language_from_path() {
    use std::path::Path;
    assert_eq!(
        language_from_path(Path::new("/x/en-US.json")).as_deref(),
        Some("en-US")
    );
    assert_eq!(
        language_from_path(Path::new("pt-BR.bot.json")).as_deref(),
        Some("pt-BR")
    );
    assert_eq!(language_from_path(Path::new(".json")), None);
}

#[tokio::test]
async fn test_load_dir_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en-US.json"), r#"{"x": "hello"}"#).unwrap();
    std::fs::write(dir.path().join("de.json"), r#"{"x": "hallo""#).unwrap();
    std::fs::write(dir.path().join("fr.json"), r#"{"x": "bonjour"}"#).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a locale").unwrap();

    let mut tr = Translator::with_placeholders("en-US");
    tr.set_fallback(Some("en-US"));
    let loaded = tr.load_dir(dir.path()).await.unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(tr.languages(), vec!["en-US", "fr"]);
    assert_eq!(tr.t("fr", "x"), "bonjour");
    assert_eq!(tr.t("de", "x"), "hello", "broken table degrades to fallback");
}

#[tokio::test]
async fn test_load_dir_missing_directory_errors() {
    let mut tr = Translator::new("en-US");
    let result = tr.load_dir("/nonexistent/__ytinfo_locales__").await;
    assert!(result.is_err());
}

#[test]
fn test_bundled_locales_cover_fallback() {
    let mut tr = Translator::with_placeholders("en-US");
    tr.set_fallback(Some("en-US"));
    assert_eq!(tr.load_bundled(), BUNDLED_LOCALES.len());
    for language in tr.languages() {
        let missing = tr.missing_keys(language);
        assert!(missing.is_empty(), "{language} is missing {missing:?}");
    }
    assert_eq!(tr.t("de", "language_name"), "Deutsch");
}

#[test]
fn test_install_bundled_locales_keeps_edits() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("locales");
    let target_str = target.to_str().unwrap();

    install_bundled_locales(target_str);
    let en = target.join("en-US.json");
    assert!(en.exists());
    assert!(target.join("de.json").exists());

    std::fs::write(&en, r#"{"x": "custom"}"#).unwrap();
    install_bundled_locales(target_str);
    assert_eq!(std::fs::read_to_string(&en).unwrap(), r#"{"x": "custom"}"#);
}

#[test]
fn test_from_config() {
    let cfg = ytinfo_core::config::I18nConfig {
        locales_dir: String::new(),
        default_locale: "de".to_string(),
        fallback_locale: "en-US".to_string(),
    };
    let tr = Translator::from_config(&cfg);
    assert_eq!(tr.active(), "de");
    assert_eq!(tr.fallback(), Some("en-US"));
    assert_eq!(tr.default_language(), "en-US");
    assert_eq!(tr.transform_count(), 1);
}
