//! YouTube link detection.
//!
//! Recognizes `watch?v=`, `youtu.be/`, `shorts/`, `embed/`, `live/` and `v/`
//! links on the `www.`, `m.` and `music.` hosts. Links wrapped in `<…>` have
//! their embed suppressed by the author and are skipped.

use regex::Regex;
use std::sync::LazyLock;

/// Length of a YouTube video ID.
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(<)?(?:https?://)?(?:(?:www|m|music)\.)?(?:youtube\.com/(?:watch\?(?:[^\s#>]*&)?v=|shorts/|embed/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]+)",
    )
    .expect("video link pattern compiles")
});

/// Whether `s` has the shape of a video ID.
pub fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Video IDs linked in `text`, in order of appearance, without duplicates,
/// at most `limit` of them.
pub fn extract_video_ids(text: &str, limit: usize) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for caps in VIDEO_LINK.captures_iter(text) {
        if ids.len() >= limit {
            break;
        }
        if caps.get(1).is_some() {
            continue;
        }
        let Some(id) = caps.get(2).map(|m| m.as_str()) else {
            continue;
        };
        if is_video_id(id) && !ids.iter().any(|known| known == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// A video ID from user input: either a bare ID or the first link found.
pub fn parse_video_ref(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if is_video_id(trimmed) {
        return Some(trimmed.to_string());
    }
    extract_video_ids(trimmed.trim_start_matches('<').trim_end_matches('>'), 1)
        .into_iter()
        .next()
}
