use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write as _;

use feedhole_core::{Decision, FilterStats, RuleEngine};

use crate::input::InputPost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with one decision per post
    Json,
    /// Human-readable tally and hidden posts
    Summary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResult {
    /// Position in the input
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    pub decision: Decision,
    /// Collapsed-post label, only for hidden posts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    pub generated_at: DateTime<Utc>,
    pub config_fingerprint: String,
    pub stats: FilterStats,
    pub results: Vec<PostResult>,
}

impl FilterReport {
    /// Score every post once. Posts repeating an already seen `urn` are
    /// skipped, and malformed entries are reported as shown.
    pub fn build(engine: &RuleEngine, posts: Vec<InputPost>) -> Self {
        let mut stats = FilterStats::new();
        let mut seen = HashSet::new();
        let mut results = Vec::with_capacity(posts.len());

        for (index, post) in posts.into_iter().enumerate() {
            let result = match post {
                InputPost::Parsed(post) => {
                    if let Some(urn) = &post.urn {
                        if !seen.insert(urn.clone()) {
                            tracing::debug!(urn = %urn, "skipping already processed post");
                            continue;
                        }
                    }
                    let decision = engine.analyze(&post.to_signals());
                    PostResult {
                        index,
                        urn: post.urn,
                        label: decision.should_hide.then(|| decision.summary()),
                        decision,
                        error: None,
                    }
                }
                InputPost::Malformed { error } => PostResult {
                    index,
                    urn: None,
                    decision: Decision::default(),
                    label: None,
                    error: Some(error),
                },
            };
            stats.record(&result.decision);
            results.push(result);
        }

        Self {
            generated_at: Utc::now(),
            config_fingerprint: engine.config().fingerprint(),
            stats,
            results,
        }
    }

    pub fn hidden(&self) -> impl Iterator<Item = &PostResult> {
        self.results.iter().filter(|r| r.decision.should_hide)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Summary => self.render_summary(),
        }
    }

    fn render_summary(&self) -> Result<String> {
        let mut out = String::new();
        self.write_summary(&mut out)?;
        Ok(out)
    }

    fn write_summary(&self, out: &mut String) -> std::fmt::Result {
        let stats = &self.stats;

        writeln!(out, "📊 Processed: {}", stats.processed)?;
        writeln!(out, "🕳️  Filtered:  {} ({}%)", stats.filtered, stats.filter_rate())?;
        if let Some(top) = stats.top_category() {
            writeln!(out, "🏆 Top filter: {}", top.label())?;
        }

        if !stats.by_category.is_empty() {
            writeln!(out, "\n📋 By reason:")?;
            for (category, count) in &stats.by_category {
                writeln!(out, "   - {:<16} {}", category.label(), count)?;
            }
        }

        let hidden: Vec<_> = self.hidden().collect();
        if !hidden.is_empty() {
            writeln!(out, "\n🙈 Hidden posts:")?;
            for result in hidden {
                let id = result
                    .urn
                    .clone()
                    .unwrap_or_else(|| format!("#{}", result.index));
                writeln!(
                    out,
                    "   {} [score {}] {}",
                    id,
                    result.decision.score,
                    result.label.as_deref().unwrap_or_default()
                )?;
            }
        }

        let malformed = self.results.iter().filter(|r| r.error.is_some()).count();
        if malformed > 0 {
            writeln!(out, "\n⚠️  {malformed} malformed post(s) passed through unscored")?;
        }

        Ok(())
    }
}
