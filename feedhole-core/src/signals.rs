// Text-signal counters used to populate PostSignals.
//
// Both counters are plain scans over the post text and never fail: any &str
// is accepted, empty input counts as 0.

use regex::Regex;
use std::sync::LazyLock;

// Emoji are classified by Unicode property so new emoji are picked up with
// the regex crate's Unicode tables rather than a hand-kept code point list.
static EMOJI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Emoji_Presentation}\p{Extended_Pictographic}]").unwrap());

// Word characters are ASCII only: letters, digits, underscore.
static HASHTAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[0-9A-Za-z_]+").unwrap());

/// Count emoji and pictographic code points in `text`.
///
/// Each code point counts on its own, so a ZWJ sequence such as a family
/// emoji contributes one per pictographic member.
pub fn count_emojis(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    EMOJI_REGEX.find_iter(text).count()
}

/// Count `#tag` occurrences in `text`. Repeated tags each count.
pub fn count_hashtags(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    HASHTAG_REGEX.find_iter(text).count()
}

/// Reduce a rendered author block to the display name on its first line.
pub fn clean_author(raw: &str) -> String {
    raw.trim().lines().next().unwrap_or_default().trim().to_string()
}
