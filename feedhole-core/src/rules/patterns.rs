use crate::config::RuleConfiguration;
use regex::Regex;
use std::sync::LazyLock;

use super::engine::weights;

// Pattern catalog. Declaration order is the scan order within a set. Sources
// are written in lowercase and matched case-insensitively, with ASCII-only
// case folding (see `expand_source`). `\w`/`\d` are spelled out as ASCII
// classes so word matching stays ASCII-only, and classes list both cases.

/// Calls for interaction, mostly anchored at the end of the post
const ENGAGEMENT_BAIT_PATTERNS: &[&str] = &[
    r"agree\s*\??\s*$",
    r"thoughts\s*\??\s*$",
    r"what do you think\s*\??\s*$",
    r"am i wrong\s*\??\s*$",
    r"change my mind\s*\.?\s*$",
    r"repost if you\s",
    r"share if you\s",
    r#"comment\s+["']?[0-9A-Za-z_]+["']?\s+(if|below)"#,
    r"tag someone who",
    r"who else\s*\??\s*$",
    r"right\s*\?\s*$",
];

/// Humble brag / origin story openers
const ORIGIN_STORY_PATTERNS: &[&str] = &[
    r"^i was (fired|rejected|broke|homeless|struggling)",
    r"^i dropped out",
    r"^i failed",
    r"^everyone told me (i couldn'?t|no|to quit)",
    r"^i went from .+ to .+ in",
    r"^nobody believed",
    r"^they laughed when",
    r"^i never thought i'?d",
    r"^[0-9]+ years ago,? i (had nothing|was broke|couldn'?t)",
    r"^i used to (make|earn) \$[0-9,]+",
];

const RAGE_HOOK_PATTERNS: &[&str] = &[
    r"^(unpopular opinion|hot take|controversial)",
    r"^stop (doing|saying|believing)",
    r"^i'?m (sick|tired) of",
    r"^nobody talks about",
    r"^the (truth|problem) (about|with|is)",
    r"will hate (this|me)",
    r"^most people (don'?t|won'?t|can'?t)",
    r"^here'?s what .+ won'?t tell you",
    r"doesn'?t want you to know",
    r"^i'?m going to get (hate|attacked|cancelled)",
];

/// Newsletter / lead magnet pitches
const NEWSLETTER_PATTERNS: &[&str] = &[
    r"subscribe to my",
    r"join my newsletter",
    r"link in (bio|comments|first comment)",
    r"download my free",
    r"get my free",
    r"i wrote about this in my",
    r"full (article|post|thread) in",
    r#"comment ["']?[0-9A-Za-z_]+["']? (and i'?ll|to get)"#,
    r#"dm me ["']?[0-9A-Za-z_]+["']?\s*(for|and)"#,
];

static ENGAGEMENT_BAIT: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_set("engagement-bait", ENGAGEMENT_BAIT_PATTERNS));
static ORIGIN_STORY: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_set("origin-story", ORIGIN_STORY_PATTERNS));
static RAGE_HOOK: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_set("rage-hook", RAGE_HOOK_PATTERNS));
static NEWSLETTER: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_set("newsletter", NEWSLETTER_PATTERNS));

/// Whitespace as the browser's regex engine defines `\s`: no NEL, plus BOM.
const WHITESPACE_CLASS: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";
/// `.` stops at every line terminator, not just `\n`.
const ANY_BUT_LINE_TERMINATOR: &str = r"[^\n\r\x{2028}\x{2029}]";

/// Rewrite a catalog source for the regex crate. ASCII letters outside
/// classes become `[xX]`, so `ſ` never folds to `s` and the Kelvin sign
/// never folds to `k`. `\s` and `.` get the line-terminator-aware sets above.
fn expand_source(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 3);
    let mut chars = source.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('s') if !in_class => out.push_str(WHITESPACE_CLASS),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '.' if !in_class => out.push_str(ANY_BUT_LINE_TERMINATOR),
            c if !in_class && c.is_ascii_alphabetic() => {
                out.push('[');
                out.push(c.to_ascii_lowercase());
                out.push(c.to_ascii_uppercase());
                out.push(']');
            }
            c => out.push(c),
        }
    }
    out
}

/// A pattern that fails to compile is dropped: it can never match, which
/// leaves the post shown rather than breaking the scan.
fn compile_set(name: &str, sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(&expand_source(source)) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::error!(set = name, pattern = source, error = %e, "dropping pattern");
                None
            }
        })
        .collect()
}

/// One category of text patterns. Each category contributes at most one
/// reason per post, however many of its patterns match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSet {
    EngagementBait,
    OriginStory,
    RageHook,
    Newsletter,
}

impl PatternSet {
    /// Evaluation order
    pub const ALL: [PatternSet; 4] = [
        PatternSet::EngagementBait,
        PatternSet::OriginStory,
        PatternSet::RageHook,
        PatternSet::Newsletter,
    ];

    pub fn reason(self) -> &'static str {
        match self {
            PatternSet::EngagementBait => "Matched engagement pattern",
            PatternSet::OriginStory => "Matched origin story hook",
            PatternSet::RageHook => "Matched hook pattern",
            PatternSet::Newsletter => "Matched newsletter pattern",
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            PatternSet::EngagementBait => weights::ENGAGEMENT_BAIT,
            PatternSet::OriginStory => weights::ORIGIN_STORY,
            PatternSet::RageHook => weights::RAGE_HOOK,
            PatternSet::Newsletter => weights::NEWSLETTER,
        }
    }

    /// The configuration toggle guarding this set.
    pub fn is_enabled(self, config: &RuleConfiguration) -> bool {
        match self {
            PatternSet::EngagementBait => config.hide_engagement_bait,
            PatternSet::OriginStory => config.hide_humble_brags,
            PatternSet::RageHook => config.hide_rage_hooks,
            PatternSet::Newsletter => config.hide_newsletter_pitches,
        }
    }

    /// Literal pattern sources, in declaration order.
    pub fn sources(self) -> &'static [&'static str] {
        match self {
            PatternSet::EngagementBait => ENGAGEMENT_BAIT_PATTERNS,
            PatternSet::OriginStory => ORIGIN_STORY_PATTERNS,
            PatternSet::RageHook => RAGE_HOOK_PATTERNS,
            PatternSet::Newsletter => NEWSLETTER_PATTERNS,
        }
    }

    pub fn patterns(self) -> &'static [Regex] {
        match self {
            PatternSet::EngagementBait => ENGAGEMENT_BAIT.as_slice(),
            PatternSet::OriginStory => ORIGIN_STORY.as_slice(),
            PatternSet::RageHook => RAGE_HOOK.as_slice(),
            PatternSet::Newsletter => NEWSLETTER.as_slice(),
        }
    }

    /// First pattern in declaration order that matches `text`.
    pub fn first_match(self, text: &str) -> Option<&'static Regex> {
        self.patterns().iter().find(|pattern| pattern.is_match(text))
    }

    pub fn is_match(self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}
