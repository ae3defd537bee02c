use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candidates::DEFAULT_THRESHOLD;
use crate::format::FormattingState;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::persist::DEFAULT_STORAGE_KEY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_limit: usize,
    pub storage_key: String,
    /// Fuzzy-match looseness: 0.0 accepts only perfect matches, 1.0 accepts
    /// anything the matcher can align.
    pub mention_threshold: f32,
    pub mention_limit: Option<usize>,
    pub initial_format: FormattingState,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mention_threshold: DEFAULT_THRESHOLD,
            mention_limit: None,
            initial_format: FormattingState::default(),
        }
    }
}

impl EditorConfig {
    pub fn with_defaults(mut self) -> Self {
        if self.history_limit == 0 {
            self.history_limit = DEFAULT_HISTORY_LIMIT;
        }
        if self.storage_key.trim().is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        if !self.mention_threshold.is_finite() {
            self.mention_threshold = DEFAULT_THRESHOLD;
        }
        self.mention_threshold = self.mention_threshold.clamp(0.0, 1.0);
        if self.mention_limit == Some(0) {
            self.mention_limit = None;
        }
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(s)?;
        Ok(config.with_defaults())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{"history_limit": 10}"#).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.initial_format, FormattingState::default());
    }

    #[test]
    fn with_defaults_repairs_out_of_range_values() {
        let config = EditorConfig {
            history_limit: 0,
            storage_key: "  ".into(),
            mention_threshold: 4.0,
            mention_limit: Some(0),
            ..EditorConfig::default()
        }
        .with_defaults();
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.mention_threshold, 1.0);
        assert_eq!(config.mention_limit, None);
    }

    #[test]
    fn nested_format_accepts_partial_objects() {
        let config =
            EditorConfig::from_json_str(r#"{"initial_format": {"font_family": "Courier New"}}"#)
                .unwrap();
        assert_eq!(config.initial_format.font_family, "Courier New");
        assert_eq!(config.initial_format.font_size, "16");
    }
}
