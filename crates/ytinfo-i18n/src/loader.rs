//! Loading translation documents from disk.

use std::path::{Path, PathBuf};
use tracing::{error, info};
use ytinfo_core::error::BotError;

use crate::table::TranslationTable;
use crate::translator::Translator;

/// Language code for a locale file: the file name up to the first `.`.
///
/// `en-US.json` → `en-US`, `pt-BR.bot.json` → `pt-BR`.
pub fn language_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let code = name.split('.').next()?;
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

impl Translator {
    /// Load every `*.json` file in `dir` as a translation table.
    ///
    /// A file that fails to parse is logged and skipped; the other languages
    /// still load. Returns how many languages were loaded.
    pub async fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, BotError> {
        let dir = dir.as_ref();
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            BotError::I18n(format!("failed to read locales dir {}: {e}", dir.display()))
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let Some(language) = language_from_path(&path) else {
                continue;
            };
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(c) => c,
                Err(e) => {
                    error!("i18n: failed to read {}: {e}", path.display());
                    continue;
                }
            };
            match TranslationTable::from_json(&content) {
                Ok(table) => {
                    info!("i18n: loaded {language} ({} strings)", table.len());
                    self.set_table(&language, table);
                    loaded += 1;
                }
                Err(e) => error!("i18n: failed to parse {}: {e}", path.display()),
            }
        }
        Ok(loaded)
    }

    /// Load the locale documents compiled into the binary.
    pub fn load_bundled(&mut self) -> usize {
        let mut loaded = 0;
        for (filename, content) in crate::bundled::BUNDLED_LOCALES {
            let Some(language) = language_from_path(Path::new(filename)) else {
                continue;
            };
            match TranslationTable::from_json(content) {
                Ok(table) => {
                    self.set_table(&language, table);
                    loaded += 1;
                }
                Err(e) => error!("i18n: bundled {filename} is invalid: {e}"),
            }
        }
        loaded
    }
}
