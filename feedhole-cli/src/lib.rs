// All scoring lives in feedhole-core
// This CLI acts as a thin wrapper that feeds it posts from files or flags

// CLI-specific modules
pub mod input;
pub mod report;

use std::path::PathBuf;

// Re-export core types for convenience
pub use feedhole_core::*;

pub use input::{load_posts, parse_posts, FeedPost, InputPost};
pub use report::{FilterReport, OutputFormat, PostResult};

/// Per-user rule file: `<config dir>/feedhole/rules.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("feedhole").join("rules.yaml"))
}
