//! Mapping platform locales onto loaded languages.

use ytinfo_i18n::Translator;

/// The loaded language that best serves `code`.
///
/// Tries an exact match, then a case-insensitive one, then the bare language
/// (`en-GB` → `en`), then any regional variant of it (`en-GB` → `en-US`).
pub fn match_language(tr: &Translator, code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    if tr.supports(code) {
        return Some(code.to_string());
    }

    let languages = tr.languages();
    if let Some(found) = languages.iter().find(|l| l.eq_ignore_ascii_case(code)) {
        return Some(found.to_string());
    }

    let base = code.split(['-', '_']).next().unwrap_or(code);
    if let Some(found) = languages.iter().find(|l| l.eq_ignore_ascii_case(base)) {
        return Some(found.to_string());
    }
    languages
        .iter()
        .find(|l| {
            l.split('-')
                .next()
                .is_some_and(|b| b.eq_ignore_ascii_case(base))
        })
        .map(|l| l.to_string())
}

/// First candidate that maps onto a loaded language, else the active language.
pub fn pick_language<'a, I>(tr: &Translator, candidates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|code| match_language(tr, code))
        .unwrap_or_else(|| tr.active().to_string())
}
