//! Substitution arguments passed along with a translation key.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Arguments for a resolution call.
///
/// Callers pick named or positional substitution explicitly. A positional
/// list whose first element is an object is still treated as named when the
/// object covers every placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    Named(Map<String, Value>),
    Positional(Vec<Value>),
}

impl Default for Args {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

impl Args {
    /// No arguments.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Named(map) => map.is_empty(),
            Self::Positional(values) => values.is_empty(),
        }
    }

    /// The mapping to use for named substitution, if there is one.
    pub fn mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Named(map) => Some(map),
            Self::Positional(values) => values.first()?.as_object(),
        }
    }

    /// The arguments as an ordered list. A named mapping is one element.
    pub fn as_positional(&self) -> Cow<'_, [Value]> {
        match self {
            Self::Named(map) => Cow::Owned(vec![Value::Object(map.clone())]),
            Self::Positional(values) => Cow::Borrowed(values.as_slice()),
        }
    }
}

/// Text substituted for a value: strings verbatim, anything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
