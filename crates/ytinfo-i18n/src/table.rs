//! Per-language translation tables.

use serde_json::{Map, Value};
use ytinfo_core::error::BotError;

/// One language's translations: a tree of string leaves and nested tables.
///
/// Tables are built once from a parsed document and never edited in place;
/// a reload replaces the whole table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    root: Map<String, Value>,
}

impl TranslationTable {
    /// Parse a JSON document. The top level must be an object.
    pub fn from_json(text: &str) -> Result<Self, BotError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a table from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, BotError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(BotError::I18n(format!(
                "translation document must be an object, found {}",
                kind(&other)
            ))),
        }
    }

    /// Find the string for `key`.
    ///
    /// The key is first walked as a dotted path through nested tables; if that
    /// does not end on a string, the whole key is tried as one top-level name.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.nested(key).or_else(|| self.flat(key))
    }

    fn nested(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        node.as_str()
    }

    fn flat(&self, key: &str) -> Option<&str> {
        self.root.get(key)?.as_str()
    }

    /// Dotted paths of every string leaf, in document order.
    pub fn keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_keys(&self.root, "", &mut out);
        out
    }

    /// Number of string leaves.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (name, value) in map {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            Value::String(_) => out.push(path),
            Value::Object(child) => collect_keys(child, &path, out),
            _ => {}
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
