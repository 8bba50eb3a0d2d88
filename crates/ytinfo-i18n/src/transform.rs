//! Ordered post-processing of resolved strings.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;
use ytinfo_core::error::BotError;

use crate::args::Args;

/// Signature of a transform function.
pub type TransformFn = dyn Fn(&TransformContext<'_>) -> String + Send + Sync;

/// Handle returned by [`crate::Translator::add_transform`], used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId(u64);

/// One match of a transform's pattern against the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformMatch {
    /// The whole matched text.
    pub text: String,
    /// Byte offset of the match in the raw string.
    pub start: usize,
    /// Capture groups after group 0, `None` where a group did not take part.
    pub groups: Vec<Option<String>>,
}

/// Everything a transform sees.
pub struct TransformContext<'a> {
    pub language: &'a str,
    pub key: &'a str,
    /// The string as found in the table.
    pub raw: &'a str,
    /// Output of the previous transform, or `raw` for the first one.
    pub current: &'a str,
    /// All non-overlapping matches of this transform's pattern in `raw`.
    pub matches: &'a [TransformMatch],
    pub args: &'a Args,
}

/// Selects a transform for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformSelector {
    Id(TransformId),
    /// Pattern source text, compared against each entry's pattern.
    Pattern(String),
}

impl From<TransformId> for TransformSelector {
    fn from(id: TransformId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TransformSelector {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<String> for TransformSelector {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&Regex> for TransformSelector {
    fn from(pattern: &Regex) -> Self {
        Self::Pattern(pattern.as_str().to_string())
    }
}

#[derive(Clone)]
struct Transform {
    id: TransformId,
    pattern: Regex,
    func: Arc<TransformFn>,
}

/// Transforms in registration order.
#[derive(Clone, Default)]
pub(crate) struct TransformPipeline {
    entries: Vec<Transform>,
    next_id: u64,
}

impl fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|t| t.pattern.as_str()))
            .finish()
    }
}

impl TransformPipeline {
    /// Append a transform. The pattern is compiled in multi-line mode.
    pub(crate) fn add<F>(&mut self, pattern: &str, func: F) -> Result<TransformId, BotError>
    where
        F: Fn(&TransformContext<'_>) -> String + Send + Sync + 'static,
    {
        let pattern = RegexBuilder::new(pattern)
            .multi_line(true)
            .build()
            .map_err(|e| BotError::I18n(format!("invalid transform pattern: {e}")))?;

        let id = TransformId(self.next_id);
        self.next_id += 1;
        self.entries.push(Transform {
            id,
            pattern,
            func: Arc::new(func),
        });
        Ok(id)
    }

    /// Remove the first entry matching `selector`. Returns whether one was removed.
    pub(crate) fn remove(&mut self, selector: &TransformSelector) -> bool {
        let position = self.entries.iter().position(|t| match selector {
            TransformSelector::Id(id) => t.id == *id,
            TransformSelector::Pattern(source) => t.pattern.as_str() == source,
        });
        match position {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Run every transform whose pattern occurs in `raw`, in registration order.
    pub(crate) fn apply(&self, language: &str, key: &str, raw: &str, args: &Args) -> String {
        let mut selected = self
            .entries
            .iter()
            .filter(|t| t.pattern.is_match(raw))
            .peekable();

        if selected.peek().is_none() {
            return raw.to_string();
        }

        let mut current = raw.to_string();
        for transform in selected {
            let matches = scan(&transform.pattern, raw);
            let ctx = TransformContext {
                language,
                key,
                raw,
                current: &current,
                matches: &matches,
                args,
            };
            current = (transform.func)(&ctx);
        }
        current
    }
}

/// Collect every match of `pattern` in `text` with a fresh iterator.
fn scan(pattern: &Regex, text: &str) -> Vec<TransformMatch> {
    let mut out: Vec<TransformMatch> = Vec::new();
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if out
            .last()
            .is_some_and(|m| m.start == whole.start() && m.text == whole.as_str())
        {
            continue;
        }
        out.push(TransformMatch {
            text: whole.as_str().to_string(),
            start: whole.start(),
            groups: caps
                .iter()
                .skip(1)
                .map(|g| g.map(|m| m.as_str().to_string()))
                .collect(),
        });
    }
    out
}
