//! Persisted subset of the editor store.
//!
//! Only content and the "sticky" formatting attributes survive a restart.
//! History, toggle flags, indent and selection are rebuilt from scratch.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{Alignment, BlockType, FormattingState, HeadingLevel};

pub const DEFAULT_STORAGE_KEY: &str = "editor-storage";
const STATE_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode persisted state: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode persisted state: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub content: String,
    pub font_size: String,
    pub font_family: String,
    pub text_color: String,
    pub highlight_color: String,
    pub alignment: Alignment,
    pub heading_level: HeadingLevel,
    pub block_type: BlockType,
}

impl PersistedState {
    pub fn capture(content: &str, format: &FormattingState) -> Self {
        Self {
            content: content.to_string(),
            font_size: format.font_size.clone(),
            font_family: format.font_family.clone(),
            text_color: format.text_color.clone(),
            highlight_color: format.highlight_color.clone(),
            alignment: format.alignment,
            heading_level: format.heading_level,
            block_type: format.block_type,
        }
    }

    /// Copies the persisted attributes onto `format`, leaving transient
    /// fields untouched.
    pub fn restore_into(&self, format: &mut FormattingState) {
        format.font_size = self.font_size.clone();
        format.font_family = self.font_family.clone();
        format.text_color = self.text_color.clone();
        format.highlight_color = self.highlight_color.clone();
        format.alignment = self.alignment;
        format.heading_level = self.heading_level;
        format.block_type = self.block_type;
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        let envelope = Envelope {
            state: self.clone(),
            version: STATE_VERSION,
        };
        serde_json::to_string(&envelope).map_err(PersistError::Encode)
    }

    pub fn from_json(s: &str) -> Result<Self, PersistError> {
        let envelope: Envelope = serde_json::from_str(s).map_err(PersistError::Decode)?;
        Ok(envelope.state)
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

/// A named key/value slot holding the persisted subset.
pub trait StateSlot {
    fn key(&self) -> &str;
    fn load(&self) -> Result<Option<PersistedState>, PersistError>;
    fn store(&mut self, state: &PersistedState) -> Result<(), PersistError>;
}

/// Keeps the serialized blob in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    key: String,
    blob: Option<String>,
    writes: usize,
}

impl MemorySlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            blob: None,
            writes: 0,
        }
    }

    pub fn with_blob(mut self, blob: impl Into<String>) -> Self {
        self.blob = Some(blob.into());
        self
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StateSlot for MemorySlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        self.blob
            .as_deref()
            .map(PersistedState::from_json)
            .transpose()
    }

    fn store(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        self.blob = Some(state.to_json()?);
        self.writes += 1;
        Ok(())
    }
}

/// Stores the blob as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    key: String,
    path: PathBuf,
}

impl JsonFileSlot {
    pub fn new(dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = dir.as_ref().join(format!("{key}.json"));
        Self { key, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateSlot for JsonFileSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        PersistedState::from_json(&content).map(Some)
    }

    fn store(&mut self, state: &PersistedState) -> Result<(), PersistError> {
        let json = state.to_json()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_camel_case_keys() {
        let state = PersistedState::capture("<p>hi</p>", &FormattingState::default());
        let json = state.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["fontSize"], "16");
        assert_eq!(value["state"]["headingLevel"], "p");
        assert_eq!(value["state"]["content"], "<p>hi</p>");
    }

    #[test]
    fn missing_version_still_decodes() {
        let json = r##"{"state":{"content":"","fontSize":"12","fontFamily":"Arial",
            "textColor":"#000000","highlightColor":"#ffffff","alignment":"right",
            "headingLevel":"h2","blockType":"pre"}}"##;
        let state = PersistedState::from_json(json).unwrap();
        assert_eq!(state.alignment, Alignment::Right);
        assert_eq!(state.block_type, BlockType::Pre);
    }

    #[test]
    fn garbage_blob_is_a_decode_error() {
        let slot = MemorySlot::new("k").with_blob("not json");
        assert!(matches!(slot.load(), Err(PersistError::Decode(_))));
    }
}
