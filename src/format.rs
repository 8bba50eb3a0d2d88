//! Localized formatting of video metadata into embeds.

use chrono::{DateTime, Utc};
use ytinfo_core::message::{Embed, EmbedAuthor, EmbedField};
use ytinfo_core::settings::{InfoLevel, NumberFormat};
use ytinfo_core::video::VideoInfo;
use ytinfo_i18n::{Args, Translator};

/// Longest description excerpt shown at the full info level.
const DESCRIPTION_EXCERPT: usize = 300;
/// Most tags shown at the full info level.
const MAX_TAGS: usize = 10;

/// How one reply is rendered.
#[derive(Debug, Clone, Copy)]
pub struct EmbedStyle<'a> {
    pub level: InfoLevel,
    pub numbers: NumberFormat,
    pub language: &'a str,
    pub color: u32,
}

/// Format a count in the given style, using the language's separators and suffixes.
pub fn format_count(n: u64, format: NumberFormat, language: &str, tr: &Translator) -> String {
    match format {
        NumberFormat::Raw => n.to_string(),
        NumberFormat::Grouped => group_digits(n, &tr.t(language, "format.group_separator")),
        NumberFormat::Compact => compact(n, language, tr),
    }
}

fn group_digits(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

fn compact(n: u64, language: &str, tr: &Translator) -> String {
    let (unit, key) = match n {
        0..=999 => return n.to_string(),
        1_000..=999_999 => (1_000, "format.thousand"),
        1_000_000..=999_999_999 => (1_000_000, "format.million"),
        _ => (1_000_000_000, "format.billion"),
    };

    // One decimal, truncated, dropped when zero or when the whole part has three digits.
    let tenths = n / (unit / 10);
    let number = if tenths % 10 == 0 || tenths >= 1000 {
        (tenths / 10).to_string()
    } else {
        format!(
            "{}{}{}",
            tenths / 10,
            tr.t(language, "format.decimal_separator"),
            tenths % 10
        )
    };
    tr.t_with(language, key, &Args::named([("n", number)]))
}

/// `H:MM:SS`, or `M:SS` under an hour.
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// A platform timestamp tag, rendered by the client in the reader's own locale.
pub fn timestamp_tag(at: &DateTime<Utc>, style: char) -> String {
    format!("<t:{}:{style}>", at.timestamp())
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
pub fn excerpt(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((end, _)) => format!("{}…", text[..end].trim_end()),
    }
}

/// Build the reply embed for one video.
pub fn build_embed(video: &VideoInfo, style: &EmbedStyle<'_>, tr: &Translator) -> Embed {
    let lang = style.language;
    let count = |n: Option<u64>| match n {
        Some(n) => format_count(n, style.numbers, lang, tr),
        None => tr.t(lang, "embed.hidden"),
    };

    let mut fields = Vec::new();

    let length = if video.is_live {
        tr.t(lang, "embed.live")
    } else {
        match video.duration_secs {
            Some(secs) => format_duration(secs),
            None => tr.t(lang, "embed.upcoming"),
        }
    };
    fields.push(field(tr.t(lang, "embed.duration"), length));

    if style.level != InfoLevel::Compact {
        fields.push(field(tr.t(lang, "embed.views"), count(video.view_count)));
        fields.push(field(tr.t(lang, "embed.likes"), count(video.like_count)));
        if let Some(at) = &video.published_at {
            fields.push(field(tr.t(lang, "embed.published"), timestamp_tag(at, 'D')));
        }
    }

    let mut description = None;
    if style.level == InfoLevel::Full {
        fields.push(field(
            tr.t(lang, "embed.comments"),
            count(video.comment_count),
        ));
        if !video.tags.is_empty() {
            let tags: Vec<&str> = video.tags.iter().take(MAX_TAGS).map(String::as_str).collect();
            fields.push(EmbedField {
                name: tr.t(lang, "embed.tags"),
                value: tags.join(", "),
                inline: false,
            });
        }
        if !video.description.trim().is_empty() {
            description = Some(excerpt(&video.description, DESCRIPTION_EXCERPT));
        }
    }

    Embed {
        title: Some(video.title.clone()),
        url: Some(video.watch_url()),
        description,
        color: Some(style.color),
        author: Some(EmbedAuthor {
            name: video.channel_title.clone(),
            url: video.channel_url(),
        }),
        thumbnail: match style.level {
            InfoLevel::Compact => None,
            _ => video.thumbnail_url.clone(),
        },
        fields,
        footer: Some(tr.t_with(lang, "embed.footer", &Args::named([("id", video.id.as_str())]))),
        timestamp: None,
    }
}

fn field(name: String, value: String) -> EmbedField {
    EmbedField {
        name,
        value,
        inline: true,
    }
}
