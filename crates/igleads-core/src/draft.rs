//! Save and restore of the in-progress annotated profile.
//!
//! The draft lives under a single fixed key so that a new scrape overwrites
//! the previous one. Loaded drafts are re-normalized, which also migrates a
//! draft saved under an older schema revision.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::normalize::{normalize_with, NormalizeOptions};
use crate::profile::NormalizedProfile;

/// Key the current draft is stored under.
pub const DRAFT_KEY: &str = "igleads.draft";

pub trait DraftStore {
    /// # Errors
    ///
    /// Returns [`CoreError`] if the backing store cannot be read.
    fn load(&self) -> Result<Option<NormalizedProfile>, CoreError>;

    /// # Errors
    ///
    /// Returns [`CoreError`] if the backing store cannot be written.
    fn save(&mut self, profile: &NormalizedProfile) -> Result<(), CoreError>;

    /// # Errors
    ///
    /// Returns [`CoreError`] if the backing store cannot be written.
    fn clear(&mut self) -> Result<(), CoreError>;
}

fn profile_to_value(profile: &NormalizedProfile) -> Result<Value, CoreError> {
    serde_json::to_value(profile).map_err(|e| CoreError::Json {
        context: format!("draft for {}", profile.username()),
        source: e,
    })
}

/// Key-value draft store backed by a JSON object on disk.
///
/// Keys other than [`DRAFT_KEY`] are preserved on write.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
    options: NormalizeOptions,
}

impl FileDraftStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, options: NormalizeOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, CoreError> {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(CoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        if body.trim().is_empty() {
            return Ok(Map::new());
        }
        let parsed: Value = serde_json::from_str(&body).map_err(|e| CoreError::Json {
            context: self.path.display().to_string(),
            source: e,
        })?;
        match parsed {
            Value::Object(map) => Ok(map),
            _ => Err(CoreError::CorruptDraftStore {
                path: self.path.clone(),
            }),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), CoreError> {
        let body = serde_json::to_string_pretty(entries).map_err(|e| CoreError::Json {
            context: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, body).map_err(|e| CoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<NormalizedProfile>, CoreError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(DRAFT_KEY)
            .filter(|v| !v.is_null())
            .map(|raw| normalize_with(raw, &self.options)))
    }

    fn save(&mut self, profile: &NormalizedProfile) -> Result<(), CoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(DRAFT_KEY.to_owned(), profile_to_value(profile)?);
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), username = %profile.username(), "draft saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(DRAFT_KEY).is_some() {
            self.write_entries(&entries)?;
            tracing::debug!(path = %self.path.display(), "draft cleared");
        }
        Ok(())
    }
}

/// In-memory draft store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: HashMap<String, Value>,
    options: NormalizeOptions,
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            entries: HashMap::new(),
            options,
        }
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<NormalizedProfile>, CoreError> {
        Ok(self
            .entries
            .get(DRAFT_KEY)
            .map(|raw| normalize_with(raw, &self.options)))
    }

    fn save(&mut self, profile: &NormalizedProfile) -> Result<(), CoreError> {
        self.entries
            .insert(DRAFT_KEY.to_owned(), profile_to_value(profile)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CoreError> {
        self.entries.remove(DRAFT_KEY);
        Ok(())
    }
}
