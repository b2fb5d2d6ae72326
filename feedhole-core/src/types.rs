use serde::{Deserialize, Serialize};

use crate::signals::{clean_author, count_emojis, count_hashtags};

/// Score at which a post is collapsed.
pub const HIDE_THRESHOLD: u32 = 50;

/// Label shown on a collapsed post that carries no reasons.
pub const FALLBACK_SUMMARY: &str = "Matched configured filters";

// ===== INPUT =====

/// Signals extracted from one rendered feed post.
///
/// Every field is optional on the wire: absent text/author become empty,
/// absent counts become 0 and absent flags become false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostSignals {
    /// Post body as rendered
    pub text: String,
    /// Display name, possibly with trailing metadata
    pub author: String,
    /// Page marked the post as paid/sponsored
    pub is_promoted: bool,
    /// Page marked the post as a reshare
    pub is_repost: bool,
    pub emoji_count: u32,
    pub hashtag_count: u32,
}

impl PostSignals {
    /// Build signals the way the extraction layer does: keep only the first
    /// line of the author block and compute both counts from the text.
    pub fn from_post(
        text: impl Into<String>,
        author: &str,
        is_promoted: bool,
        is_repost: bool,
    ) -> Self {
        let text = text.into();
        let emoji_count = saturating_u32(count_emojis(&text));
        let hashtag_count = saturating_u32(count_hashtags(&text));

        Self {
            text,
            author: clean_author(author),
            is_promoted,
            is_repost,
            emoji_count,
            hashtag_count,
        }
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ===== OUTPUT =====

/// Outcome of scoring one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub should_hide: bool,
    /// Triggered reasons, in evaluation order
    pub reasons: Vec<String>,
    /// Sum of triggered weights
    pub score: u32,
}

impl Decision {
    /// Finalize an accumulated score and reason list.
    pub fn from_hits(reasons: Vec<String>, score: u32) -> Self {
        Self {
            should_hide: score >= HIDE_THRESHOLD,
            reasons,
            score,
        }
    }

    /// Label for the collapsed-post placeholder.
    pub fn summary(&self) -> String {
        if self.reasons.is_empty() {
            FALLBACK_SUMMARY.to_string()
        } else {
            self.reasons.join(", ")
        }
    }
}
