use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a rule configuration.
///
/// Scoring itself never fails; these only surface at the load boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML rule configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON rule configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rule configuration must be a mapping of option names to values")]
    NotAMapping,
}

/// Built-in rule configuration. Partial user configurations are merged over
/// this value key by key.
pub const DEFAULT_CONFIGURATION: RuleConfiguration = RuleConfiguration {
    max_hashtags: 5,
    max_emojis: 8,
    min_post_length: 50,
    hide_promoted: true,
    hide_reposts: true,
    hide_newsletter_pitches: true,
    hide_engagement_bait: true,
    hide_humble_brags: true,
    hide_rage_hooks: true,
    blocked_phrases: Vec::new(),
    muted_authors: Vec::new(),
};

/// User-configured filter rules.
///
/// Field names serialize in camelCase to match the keys the extension keeps
/// in its settings store. Missing keys take their defaults and unknown keys
/// are ignored, so older and newer settings blobs both load. The loaders also
/// replace any key whose value has the wrong type with its default, so one
/// bad key never discards the rest of the user's settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleConfiguration {
    /// Thresholds
    pub max_hashtags: u32,
    pub max_emojis: u32,
    /// Accepted and persisted, not weighted into the score
    pub min_post_length: u32,

    /// Toggle rules
    pub hide_promoted: bool,
    pub hide_reposts: bool,
    pub hide_newsletter_pitches: bool,
    pub hide_engagement_bait: bool,
    pub hide_humble_brags: bool,
    pub hide_rage_hooks: bool,

    /// Case-insensitive substrings matched against post text
    pub blocked_phrases: Vec<String>,
    /// Case-insensitive substrings matched against the author
    pub muted_authors: Vec<String>,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        DEFAULT_CONFIGURATION
    }
}

impl RuleConfiguration {
    /// Parse a YAML document (JSON objects are valid YAML too).
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty file means "no overrides".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_yaml::from_str(content)?;
        Self::from_json_value(value)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json_value(value)
    }

    /// Shallow-merge a settings object over the defaults, key by key.
    ///
    /// A value that does not fit its option (a negative threshold, a `null`
    /// list, a string where a bool belongs) is logged and the option keeps
    /// its default. Only a document that is not a mapping at all is an error.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let overrides = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            _ => return Err(ConfigError::NotAMapping),
        };

        let serde_json::Value::Object(mut merged) = serde_json::to_value(DEFAULT_CONFIGURATION)?
        else {
            return Err(ConfigError::NotAMapping);
        };

        for (key, value) in overrides {
            // Unknown keys are ignored
            if !merged.contains_key(&key) {
                continue;
            }
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());
            match serde_json::from_value::<RuleConfiguration>(serde_json::Value::Object(candidate)) {
                Ok(_) => {
                    merged.insert(key, value);
                }
                Err(e) => {
                    tracing::warn!(option = %key, error = %e, "invalid option value, keeping default");
                }
            }
        }

        let config: RuleConfiguration = serde_json::from_value(serde_json::Value::Object(merged))?;
        Ok(config.normalized())
    }

    /// Load config from file path; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::debug!(path = %path.display(), "loaded rule configuration");
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!(path = %p.display(), error = %e, "using default rule configuration");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Trim list entries and drop blank ones. A blank phrase would be a
    /// substring of every post.
    pub fn normalized(mut self) -> Self {
        normalize_entries(&mut self.blocked_phrases);
        normalize_entries(&mut self.muted_authors);
        self
    }

    /// Hex SHA-256 of the canonical JSON form. Two configurations with the
    /// same fingerprint score every post identically.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        // Serializing a plain struct of numbers, bools and strings cannot fail.
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        hasher.update(&canonical);
        format!("{:x}", hasher.finalize())
    }
}

fn normalize_entries(entries: &mut Vec<String>) {
    entries.retain_mut(|entry| {
        let trimmed = entry.trim();
        if trimmed.len() != entry.len() {
            *entry = trimmed.to_string();
        }
        !entry.is_empty()
    });
}
