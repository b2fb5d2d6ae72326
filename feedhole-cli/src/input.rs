use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use feedhole_core::PostSignals;

/// A post as captured from the feed: the signal fields plus the page's post
/// identifier. Counts may be left out and are then computed from the text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedPost {
    pub urn: Option<String>,
    pub text: String,
    pub author: String,
    pub is_promoted: bool,
    pub is_repost: bool,
    pub emoji_count: Option<u32>,
    pub hashtag_count: Option<u32>,
}

impl FeedPost {
    pub fn to_signals(&self) -> PostSignals {
        let mut signals =
            PostSignals::from_post(self.text.clone(), &self.author, self.is_promoted, self.is_repost);
        if let Some(count) = self.emoji_count {
            signals.emoji_count = count;
        }
        if let Some(count) = self.hashtag_count {
            signals.hashtag_count = count;
        }
        signals
    }
}

/// One entry of a posts file. Entries that fail to parse are kept so the
/// report can show them as passed through.
#[derive(Debug)]
pub enum InputPost {
    Parsed(FeedPost),
    Malformed { error: String },
}

/// Read a posts file: either a JSON array or one JSON object per line.
pub fn load_posts(path: &Path) -> Result<Vec<InputPost>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read posts from {}", path.display()))?;
    Ok(parse_posts(&content))
}

pub fn parse_posts(content: &str) -> Vec<InputPost> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
            Ok(values) => return values.into_iter().map(parse_value).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "posts file is not a JSON array, trying JSON lines");
            }
        }
    }

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match serde_json::from_str::<FeedPost>(line) {
            Ok(post) => InputPost::Parsed(post),
            Err(e) => malformed(e),
        })
        .collect()
}

fn parse_value(value: serde_json::Value) -> InputPost {
    match serde_json::from_value::<FeedPost>(value) {
        Ok(post) => InputPost::Parsed(post),
        Err(e) => malformed(e),
    }
}

fn malformed(e: serde_json::Error) -> InputPost {
    tracing::warn!(error = %e, "skipping malformed post, leaving it shown");
    InputPost::Malformed {
        error: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(posts: &[InputPost]) -> Vec<&FeedPost> {
        posts
            .iter()
            .filter_map(|p| match p {
                InputPost::Parsed(post) => Some(post),
                InputPost::Malformed { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_json_array() {
        let posts = parse_posts(r#"[{"urn": "a", "text": "hi"}, {"isPromoted": true}, 42]"#);
        assert_eq!(posts.len(), 3);
        let ok = parsed(&posts);
        assert_eq!(ok.len(), 2);
        assert_eq!(ok[0].urn.as_deref(), Some("a"));
        assert!(ok[1].is_promoted);
        assert!(matches!(posts[2], InputPost::Malformed { .. }));
    }

    #[test]
    fn test_parse_json_lines() {
        let content = "{\"text\": \"one\"}\n\n   \n{not json}\n{\"text\": \"two\", \"isRepost\": true}\n";
        let posts = parse_posts(content);
        assert_eq!(posts.len(), 3);
        assert_eq!(parsed(&posts).len(), 2);
    }

    #[test]
    fn test_lone_surrogate_is_malformed_not_fatal() {
        let posts = parse_posts("{\"text\": \"\\ud800 broken\"}\n{\"text\": \"fine\"}");
        assert_eq!(posts.len(), 2);
        assert!(matches!(posts[0], InputPost::Malformed { .. }));
        assert_eq!(parsed(&posts)[0].text, "fine");
    }

    #[test]
    fn test_to_signals_fills_missing_counts() {
        let post = FeedPost {
            text: "Launch 🚀 #ai #ml".to_string(),
            author: "Jane Doe\nFounder".to_string(),
            hashtag_count: Some(9),
            ..Default::default()
        };
        let signals = post.to_signals();
        assert_eq!(signals.author, "Jane Doe");
        assert_eq!(signals.emoji_count, 1);
        // Supplied counts win over computed ones
        assert_eq!(signals.hashtag_count, 9);
    }
}
