//! # ytinfo-i18n
//!
//! Translation engine for the ytinfo bot.
//!
//! A [`Translator`] owns one [`TranslationTable`] per language, an active and
//! a fallback language, and an ordered list of transforms that post-process
//! every resolved string. Keys are dotted paths into the nested tables
//! (`"settings.saved"`), with a flat lookup of the whole key as a second try.
//!
//! ```
//! use serde_json::json;
//! use ytinfo_i18n::{Args, TranslationTable, Translator};
//!
//! let mut tr = Translator::with_placeholders("en-US");
//! let table = TranslationTable::from_value(json!({
//!     "greet": "Hello, ${name}!"
//! }))
//! .unwrap();
//! tr.set_table("en-US", table);
//!
//! let out = tr.resolve(None, "greet", &Args::named([("name", "Ada")]));
//! assert_eq!(out, "Hello, Ada!");
//! ```

mod args;
mod bundled;
mod loader;
mod placeholder;
mod table;
mod transform;
mod translator;

#[cfg(test)]
mod tests;

pub use args::{value_text, Args};
pub use bundled::{install_bundled_locales, BUNDLED_LOCALES};
pub use loader::language_from_path;
pub use placeholder::{substitute_placeholders, PLACEHOLDER_PATTERN};
pub use table::TranslationTable;
pub use transform::{TransformContext, TransformId, TransformMatch, TransformSelector};
pub use translator::Translator;
