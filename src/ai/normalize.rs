//! Text Normalizer: prepares raw chat text for keyword matching.
//!
//! Social-media noise (links, @mentions, #hashtags) is removed and only
//! conversational punctuation survives, so `!` and `?` can still drive the
//! contextual boosters downstream.

use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+",
    )
    .expect("URL pattern is a valid literal regex")
});

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern is a valid literal regex"));

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag pattern is a valid literal regex"));

static DISALLOWED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s!?.,;:'"()\-]"#).expect("punctuation pattern is a valid literal regex")
});

/// Normalize text for emotion keyword matching.
///
/// Steps run in a fixed order: lowercase + whitespace collapse, URL removal,
/// mention/hashtag removal, then stripping of non-conversational characters.
/// Removing a token can leave a double space behind; that is harmless because
/// every consumer tokenizes on whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let no_urls = URL_RE.replace_all(&lowered, "");
    let no_mentions = MENTION_RE.replace_all(&no_urls, "");
    let no_tags = HASHTAG_RE.replace_all(&no_mentions, "");

    DISALLOWED_RE.replace_all(&no_tags, "").into_owned()
}
