use crate::config::RuleConfiguration;
use crate::types::{Decision, PostSignals};

use super::patterns::PatternSet;

/// Rule weights. A single strong signal (promoted, muted author) crosses the
/// hide threshold alone; stylistic signals only hide in combination.
pub mod weights {
    pub const PROMOTED: u32 = 100;
    pub const REPOST: u32 = 50;
    pub const MUTED_AUTHOR: u32 = 100;
    pub const HASHTAGS: u32 = 20;
    pub const EMOJIS: u32 = 15;
    pub const ENGAGEMENT_BAIT: u32 = 30;
    pub const ORIGIN_STORY: u32 = 25;
    pub const RAGE_HOOK: u32 = 25;
    pub const NEWSLETTER: u32 = 35;
    pub const BLOCKED_PHRASE: u32 = 40;
}

pub const REASON_PROMOTED: &str = "Promoted content";
pub const REASON_REPOST: &str = "Repost";
pub const REASON_MUTED_AUTHOR: &str = "Author matches muted pattern";
pub const REASON_BLOCKED_PHRASE: &str = "Contains blocked phrase";

/// Accumulates triggered rules in evaluation order.
#[derive(Debug, Default)]
struct Tally {
    reasons: Vec<String>,
    score: u32,
}

impl Tally {
    fn push(&mut self, weight: u32, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::trace!(weight, reason = %reason, "rule triggered");
        self.score = self.score.saturating_add(weight);
        self.reasons.push(reason);
    }

    fn finish(self) -> Decision {
        Decision::from_hits(self.reasons, self.score)
    }
}

/// Score one post against a rule configuration.
///
/// Every check is independent and additive; nothing short-circuits across
/// checks. Pure: the same inputs always yield the same decision.
pub fn analyze(signals: &PostSignals, config: &RuleConfiguration) -> Decision {
    let mut tally = Tally::default();

    if config.hide_promoted && signals.is_promoted {
        tally.push(weights::PROMOTED, REASON_PROMOTED);
    }

    if config.hide_reposts && signals.is_repost {
        tally.push(weights::REPOST, REASON_REPOST);
    }

    if contains_any(&signals.author, &config.muted_authors) {
        tally.push(weights::MUTED_AUTHOR, REASON_MUTED_AUTHOR);
    }

    if signals.hashtag_count > config.max_hashtags {
        tally.push(
            weights::HASHTAGS,
            format!("Hashtag count ({} > {})", signals.hashtag_count, config.max_hashtags),
        );
    }

    if signals.emoji_count > config.max_emojis {
        tally.push(
            weights::EMOJIS,
            format!("Emoji density ({} > {})", signals.emoji_count, config.max_emojis),
        );
    }

    for set in PatternSet::ALL {
        if set.is_enabled(config) && set.is_match(&signals.text) {
            tally.push(set.weight(), set.reason());
        }
    }

    if contains_any(&signals.text, &config.blocked_phrases) {
        tally.push(weights::BLOCKED_PHRASE, REASON_BLOCKED_PHRASE);
    }

    tally.finish()
}

/// Case-insensitive substring test; true on the first needle found.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if needles.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Rule engine bound to one configuration, for scoring a stream of posts.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: RuleConfiguration,
}

impl RuleEngine {
    pub fn new(config: RuleConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfiguration {
        &self.config
    }

    pub fn analyze(&self, signals: &PostSignals) -> Decision {
        analyze(signals, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> RuleConfiguration {
        RuleConfiguration {
            hide_promoted: false,
            hide_reposts: false,
            hide_newsletter_pitches: false,
            hide_engagement_bait: false,
            hide_humble_brags: false,
            hide_rage_hooks: false,
            ..RuleConfiguration::default()
        }
    }

    #[test]
    fn test_contains_any_is_case_insensitive() {
        let needles = vec!["jane doe".to_string()];
        assert!(contains_any("Jane Doe", &needles));
        assert!(contains_any("JANE DOE SMITH", &needles));
        assert!(!contains_any("John Smith", &needles));
        assert!(!contains_any("Jane Doe", &[]));
    }

    #[test]
    fn test_muted_author_counts_once() {
        let config = RuleConfiguration {
            muted_authors: vec!["jane".to_string(), "doe".to_string()],
            ..quiet_config()
        };
        let signals = PostSignals {
            author: "Jane Doe".to_string(),
            ..Default::default()
        };
        let decision = analyze(&signals, &config);
        assert_eq!(decision.score, weights::MUTED_AUTHOR);
        assert_eq!(decision.reasons, vec![REASON_MUTED_AUTHOR.to_string()]);
    }

    #[test]
    fn test_count_reasons_include_both_numbers() {
        let signals = PostSignals {
            hashtag_count: 7,
            emoji_count: 9,
            ..Default::default()
        };
        let decision = analyze(&signals, &quiet_config());
        assert_eq!(
            decision.reasons,
            vec!["Hashtag count (7 > 5)".to_string(), "Emoji density (9 > 8)".to_string()]
        );
        assert_eq!(decision.score, 35);
        assert!(!decision.should_hide);
    }

    #[test]
    fn test_counts_at_threshold_do_not_trigger() {
        let signals = PostSignals {
            hashtag_count: 5,
            emoji_count: 8,
            ..Default::default()
        };
        assert_eq!(analyze(&signals, &RuleConfiguration::default()).score, 0);
    }

    #[test]
    fn test_engine_wraps_analyze() {
        let engine = RuleEngine::new(quiet_config());
        let signals = PostSignals {
            is_promoted: true,
            text: "Agree?".to_string(),
            ..Default::default()
        };
        assert_eq!(engine.analyze(&signals), analyze(&signals, engine.config()));
        assert_eq!(engine.analyze(&signals).score, 0);
    }
}
