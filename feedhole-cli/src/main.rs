use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Import from feedhole-core via the CLI crate
use feedhole::{
    default_config_path, load_posts, FeedPost, FilterReport, InputPost, OutputFormat,
    RuleConfiguration, RuleEngine,
};

#[derive(Parser)]
#[command(name = "feedhole")]
#[command(about = "Score social-feed posts against configurable filter rules")]
struct Args {
    /// Posts file: a JSON array or one JSON object per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to rule config file (YAML or JSON)
    /// If not specified, uses <config dir>/feedhole/rules.yaml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Summary)]
    output_format: OutputFormat,

    /// Output file path (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective rule configuration as YAML and exit
    #[arg(long)]
    show_config: bool,

    /// Score a single post with this text instead of reading --input
    #[arg(long)]
    text: Option<String>,

    /// Author of the single post given with --text
    #[arg(long, default_value = "")]
    author: String,

    /// Mark the single post as promoted
    #[arg(long)]
    promoted: bool,

    /// Mark the single post as a repost
    #[arg(long)]
    repost: bool,

    /// Extra blocked phrase (repeatable)
    #[arg(long = "block-phrase")]
    block_phrases: Vec<String>,

    /// Extra muted author pattern (repeatable)
    #[arg(long = "mute-author")]
    mute_authors: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(&args);

    if args.show_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let posts = if let Some(text) = &args.text {
        vec![InputPost::Parsed(FeedPost {
            text: text.clone(),
            author: args.author.clone(),
            is_promoted: args.promoted,
            is_repost: args.repost,
            ..Default::default()
        })]
    } else if let Some(input) = &args.input {
        eprintln!("📄 Processing: {}", input.display());
        load_posts(input)?
    } else {
        bail!("nothing to score: pass --input <file> or --text <post>");
    };

    let engine = RuleEngine::new(config);
    let report = FilterReport::build(&engine, posts);
    let rendered = report.render(args.output_format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!(
                "✅ {} of {} posts hidden",
                report.stats.filtered, report.stats.processed
            );
            eprintln!("💾 Report saved to: {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Resolve the rule configuration and apply CLI overrides.
fn load_config(args: &Args) -> RuleConfiguration {
    let path = args
        .config
        .clone()
        .or_else(|| default_config_path().filter(|p| p.exists()));

    let mut config = RuleConfiguration::load_with_fallback(path.as_deref());
    match &path {
        Some(p) => eprintln!("📋 Loaded rules from: {}", p.display()),
        None => eprintln!("📋 Using default rules"),
    }

    // Apply CLI overrides to config
    config.blocked_phrases.extend(args.block_phrases.iter().cloned());
    config.muted_authors.extend(args.mute_authors.iter().cloned());
    config.normalized()
}
