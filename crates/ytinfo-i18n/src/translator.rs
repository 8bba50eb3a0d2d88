//! Language registry and key resolution.

use std::collections::BTreeMap;
use ytinfo_core::config::I18nConfig;
use ytinfo_core::error::BotError;

use crate::args::Args;
use crate::placeholder::{substitute_placeholders, PLACEHOLDER_PATTERN};
use crate::table::TranslationTable;
use crate::transform::{TransformContext, TransformId, TransformPipeline, TransformSelector};

/// Translation tables for every loaded language plus the transforms applied
/// to resolved strings.
///
/// Built and filled through `&mut` during startup, then shared read-only
/// (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Translator {
    tables: BTreeMap<String, TranslationTable>,
    active: String,
    fallback: Option<String>,
    transforms: TransformPipeline,
}

impl Translator {
    /// An empty translator with no fallback and no transforms.
    pub fn new(active: &str) -> Self {
        Self {
            tables: BTreeMap::new(),
            active: active.to_string(),
            fallback: None,
            transforms: TransformPipeline::default(),
        }
    }

    /// An empty translator with `${name}` substitution registered.
    pub fn with_placeholders(active: &str) -> Self {
        let mut tr = Self::new(active);
        tr.transforms
            .add(PLACEHOLDER_PATTERN, substitute_placeholders)
            .expect("placeholder pattern compiles");
        tr
    }

    /// A translator set up from config: active and fallback language, plus
    /// placeholder substitution. Tables still need loading.
    pub fn from_config(config: &I18nConfig) -> Self {
        let mut tr = Self::with_placeholders(config.default_locale.trim());
        tr.set_fallback(config.fallback());
        tr
    }

    // --- Registry ---

    /// Install `table` for `language`, replacing any previous table.
    pub fn set_table(&mut self, language: &str, table: TranslationTable) -> Option<TranslationTable> {
        self.tables.insert(language.to_string(), table)
    }

    /// Table for `language`, or for the active language when `None`.
    pub fn table(&self, language: Option<&str>) -> Option<&TranslationTable> {
        self.tables.get(language.unwrap_or(self.active.as_str()))
    }

    pub fn delete_table(&mut self, language: &str) -> Option<TranslationTable> {
        self.tables.remove(language)
    }

    /// Registered language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn supports(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    pub fn set_active(&mut self, language: &str) {
        self.active = language.to_string();
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn set_fallback(&mut self, language: Option<&str>) {
        self.fallback = language.map(str::to_string);
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// The language used when nothing better is known: the fallback if set,
    /// else the active language.
    pub fn default_language(&self) -> &str {
        self.fallback.as_deref().unwrap_or(self.active.as_str())
    }

    // --- Transforms ---

    /// Append a transform run on every resolved string matching `pattern`.
    pub fn add_transform<F>(&mut self, pattern: &str, func: F) -> Result<TransformId, BotError>
    where
        F: Fn(&TransformContext<'_>) -> String + Send + Sync + 'static,
    {
        self.transforms.add(pattern, func)
    }

    /// Remove the first transform matching `selector` (handle or pattern).
    pub fn remove_transform(&mut self, selector: impl Into<TransformSelector>) -> bool {
        self.transforms.remove(&selector.into())
    }

    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Run the transform pipeline on an already resolved string.
    pub fn apply_transforms(&self, language: &str, key: &str, raw: &str, args: &Args) -> String {
        self.transforms.apply(language, key, raw, args)
    }

    // --- Resolution ---

    /// Resolve `key` in `language` (active language when `None`).
    ///
    /// Falls back to the fallback language when the table or the key is
    /// missing, and to `key` itself when that fails too.
    pub fn resolve(&self, language: Option<&str>, key: &str, args: &Args) -> String {
        let language = language.unwrap_or(self.active.as_str());
        match self.lookup(language, key) {
            Some((found_in, raw)) => self.transforms.apply(found_in, key, raw, args),
            None => key.to_string(),
        }
    }

    /// Resolve without arguments.
    pub fn t(&self, language: &str, key: &str) -> String {
        self.resolve(Some(language), key, &Args::none())
    }

    /// Resolve with arguments.
    pub fn t_with(&self, language: &str, key: &str, args: &Args) -> String {
        self.resolve(Some(language), key, args)
    }

    /// Whether `key` resolves to something other than itself.
    pub fn has_key(&self, key: &str, language: Option<&str>) -> bool {
        self.resolve(language, key, &Args::none()) != key
    }

    /// Find the raw string and the language that supplied it.
    fn lookup<'a>(&'a self, language: &'a str, key: &str) -> Option<(&'a str, &'a str)> {
        if let Some(raw) = self.tables.get(language).and_then(|t| t.lookup(key)) {
            return Some((language, raw));
        }
        let fallback = self.fallback.as_deref().filter(|fb| *fb != language)?;
        let raw = self.tables.get(fallback)?.lookup(key)?;
        Some((fallback, raw))
    }

    // --- Localization maps ---

    /// Map every language that has `key` to its transformed string.
    ///
    /// Each language is looked up on its own, without fallback. When no
    /// language has the key the map holds the key itself under the default
    /// language, so it is never empty.
    pub fn localization_map(&self, key: &str, prefix: Option<&str>) -> BTreeMap<String, String> {
        let none = Args::none();
        let mut out: BTreeMap<String, String> = self
            .tables
            .iter()
            .filter_map(|(language, table)| {
                let raw = table.lookup(key)?;
                let value = self.transforms.apply(language, key, raw, &none);
                Some((language.clone(), format!("{}{value}", prefix.unwrap_or(""))))
            })
            .collect();

        if out.is_empty() {
            out.insert(self.default_language().to_string(), key.to_string());
        }
        out
    }

    /// Keys the fallback language has that `language` lacks.
    pub fn missing_keys(&self, language: &str) -> Vec<String> {
        let Some(reference) = self.fallback.as_deref().and_then(|fb| self.tables.get(fb)) else {
            return Vec::new();
        };
        let Some(table) = self.tables.get(language) else {
            return reference.keys();
        };
        reference
            .keys()
            .into_iter()
            .filter(|key| table.lookup(key).is_none())
            .collect()
    }
}
