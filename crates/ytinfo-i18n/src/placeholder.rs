//! `${name}` placeholder substitution, the transform every translator registers.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::args::value_text;
use crate::transform::TransformContext;

/// Pattern for `${name}` placeholders. Group 1 is the name.
pub const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]*)\}";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern compiles"));

/// Replace placeholders in `ctx.current`.
///
/// Named substitution applies when the arguments carry a mapping that has a
/// value for every placeholder name in the raw string. Otherwise the
/// arguments fill placeholders in order of appearance until they run out;
/// the remaining placeholders are left as written.
pub fn substitute_placeholders(ctx: &TransformContext<'_>) -> String {
    if let Some(map) = ctx.args.mapping() {
        let covered = ctx.matches.iter().all(|m| {
            m.groups
                .first()
                .and_then(|g| g.as_deref())
                .is_some_and(|name| map.contains_key(name))
        });
        if covered {
            return PLACEHOLDER
                .replace_all(ctx.current, |caps: &Captures<'_>| match map.get(&caps[1]) {
                    Some(value) => value_text(value),
                    None => caps[0].to_string(),
                })
                .into_owned();
        }
    }

    let values = ctx.args.as_positional();
    if values.is_empty() {
        return ctx.current.to_string();
    }

    let mut next = 0;
    PLACEHOLDER
        .replace_all(ctx.current, |caps: &Captures<'_>| {
            let out = match values.get(next) {
                Some(value) => value_text(value),
                None => caps[0].to_string(),
            };
            next += 1;
            out
        })
        .into_owned()
}
