// FeedHole Core Library
//
// Scores social-feed posts against user-configured filter rules.
// Main interface is `analyze(signals, config) -> Decision`; extraction,
// observation and rendering live with the caller.

pub mod types;
pub mod signals;
pub mod config;
pub mod rules;
pub mod stats;

// Re-export main types and functions for easy use
pub use types::*;
pub use signals::{clean_author, count_emojis, count_hashtags};
pub use config::{ConfigError, RuleConfiguration, DEFAULT_CONFIGURATION};
pub use rules::{analyze, PatternSet, RuleEngine};
pub use stats::{FilterStats, ReasonCategory};
