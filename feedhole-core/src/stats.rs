use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Decision;

/// Dashboard grouping for a reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReasonCategory {
    Promoted,
    Repost,
    MutedAuthor,
    Hashtags,
    Emojis,
    EngagementBait,
    OriginStory,
    RageHook,
    Newsletter,
    BlockedPhrase,
    Other,
}

impl ReasonCategory {
    /// Classify by keyword. Order matters: "Matched origin story hook" must
    /// land in OriginStory before the generic "hook" check.
    pub fn from_reason(reason: &str) -> Self {
        const KEYWORDS: &[(&str, ReasonCategory)] = &[
            ("promoted", ReasonCategory::Promoted),
            ("repost", ReasonCategory::Repost),
            ("author", ReasonCategory::MutedAuthor),
            ("hashtag", ReasonCategory::Hashtags),
            ("emoji", ReasonCategory::Emojis),
            ("engagement", ReasonCategory::EngagementBait),
            ("origin", ReasonCategory::OriginStory),
            ("hook", ReasonCategory::RageHook),
            ("newsletter", ReasonCategory::Newsletter),
            ("blocked", ReasonCategory::BlockedPhrase),
        ];

        let lower = reason.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(ReasonCategory::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            ReasonCategory::Promoted => "Promoted",
            ReasonCategory::Repost => "Repost",
            ReasonCategory::MutedAuthor => "Muted author",
            ReasonCategory::Hashtags => "Hashtags",
            ReasonCategory::Emojis => "Emojis",
            ReasonCategory::EngagementBait => "Engagement bait",
            ReasonCategory::OriginStory => "Origin story",
            ReasonCategory::RageHook => "Rage hook",
            ReasonCategory::Newsletter => "Newsletter",
            ReasonCategory::BlockedPhrase => "Blocked phrase",
            ReasonCategory::Other => "Other",
        }
    }
}

/// Running tally of scored posts. Only hidden posts feed `by_category`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub processed: u64,
    pub filtered: u64,
    pub by_category: BTreeMap<ReasonCategory, u64>,
}

impl FilterStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, decision: &Decision) {
        self.processed += 1;
        if !decision.should_hide {
            return;
        }
        self.filtered += 1;
        for reason in &decision.reasons {
            *self
                .by_category
                .entry(ReasonCategory::from_reason(reason))
                .or_insert(0) += 1;
        }
    }

    /// Share of processed posts that were hidden, as a rounded percentage.
    pub fn filter_rate(&self) -> u64 {
        if self.processed == 0 {
            return 0;
        }
        (self.filtered as f64 / self.processed as f64 * 100.0).round() as u64
    }

    /// Category that hid the most posts. Ties go to the category declared
    /// first; `None` until something has been hidden.
    pub fn top_category(&self) -> Option<ReasonCategory> {
        self.by_category
            .iter()
            .filter(|(_, count)| **count > 0)
            .fold(None, |top: Option<(ReasonCategory, u64)>, (category, count)| match top {
                Some((_, best)) if best >= *count => top,
                _ => Some((*category, *count)),
            })
            .map(|(category, _)| category)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reason() {
        assert_eq!(ReasonCategory::from_reason("Promoted content"), ReasonCategory::Promoted);
        assert_eq!(ReasonCategory::from_reason("Repost"), ReasonCategory::Repost);
        assert_eq!(
            ReasonCategory::from_reason("Author matches muted pattern"),
            ReasonCategory::MutedAuthor
        );
        assert_eq!(ReasonCategory::from_reason("Hashtag count (9 > 5)"), ReasonCategory::Hashtags);
        assert_eq!(ReasonCategory::from_reason("Emoji density (12 > 8)"), ReasonCategory::Emojis);
        assert_eq!(
            ReasonCategory::from_reason("Matched engagement pattern"),
            ReasonCategory::EngagementBait
        );
        assert_eq!(
            ReasonCategory::from_reason("Matched origin story hook"),
            ReasonCategory::OriginStory
        );
        assert_eq!(ReasonCategory::from_reason("Matched hook pattern"), ReasonCategory::RageHook);
        assert_eq!(
            ReasonCategory::from_reason("Matched newsletter pattern"),
            ReasonCategory::Newsletter
        );
        assert_eq!(
            ReasonCategory::from_reason("Contains blocked phrase"),
            ReasonCategory::BlockedPhrase
        );
        assert_eq!(ReasonCategory::from_reason("something new"), ReasonCategory::Other);
    }

    #[test]
    fn test_record_and_rate() {
        let mut stats = FilterStats::new();
        assert_eq!(stats.filter_rate(), 0);

        stats.record(&Decision::from_hits(vec!["Promoted content".into()], 100));
        stats.record(&Decision::from_hits(vec!["Hashtag count (6 > 5)".into()], 20));
        stats.record(&Decision::default());

        assert_eq!(stats.processed, 3);
        assert_eq!(stats.filtered, 1);
        assert_eq!(stats.filter_rate(), 33);
        assert_eq!(stats.by_category.get(&ReasonCategory::Promoted), Some(&1));
        // Shown posts don't feed the category breakdown
        assert_eq!(stats.by_category.get(&ReasonCategory::Hashtags), None);

        stats.reset();
        assert_eq!(stats, FilterStats::default());
    }

    #[test]
    fn test_rate_rounds() {
        let mut stats = FilterStats::new();
        stats.record(&Decision::from_hits(vec!["Repost".into()], 50));
        stats.record(&Decision::from_hits(vec!["Repost".into()], 50));
        stats.record(&Decision::default());
        assert_eq!(stats.filter_rate(), 67);
    }

    #[test]
    fn test_top_category() {
        let mut stats = FilterStats::new();
        assert_eq!(stats.top_category(), None);

        // Shown posts never make a top category
        stats.record(&Decision::default());
        assert_eq!(stats.top_category(), None);

        stats.record(&Decision::from_hits(vec!["Repost".into()], 50));
        stats.record(&Decision::from_hits(
            vec!["Repost".into(), "Contains blocked phrase".into()],
            90,
        ));
        stats.record(&Decision::from_hits(vec!["Contains blocked phrase".into()], 40));
        stats.record(&Decision::from_hits(vec!["Contains blocked phrase".into()], 40));
        assert_eq!(stats.top_category(), Some(ReasonCategory::BlockedPhrase));
    }

    #[test]
    fn test_top_category_tie_goes_to_first_declared() {
        let mut stats = FilterStats::new();
        stats.record(&Decision::from_hits(vec!["Matched newsletter pattern".into()], 50));
        stats.record(&Decision::from_hits(vec!["Promoted content".into()], 100));
        assert_eq!(stats.top_category(), Some(ReasonCategory::Promoted));

        stats.by_category.insert(ReasonCategory::Emojis, 0);
        assert_eq!(stats.top_category(), Some(ReasonCategory::Promoted));
    }
}
