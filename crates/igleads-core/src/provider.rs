//! Sources of raw profile scrapes.
//!
//! Page scraping itself lives outside this crate; anything that can hand over
//! a JSON document implements [`RawScrapeProvider`] and the normalizer takes
//! it from there.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::CoreError;

pub trait RawScrapeProvider {
    /// Produces one raw scrape document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the underlying source cannot be read.
    fn scrape(&self) -> Result<Value, CoreError>;

    /// Produces every record the source holds. A top-level JSON array is
    /// split into its elements; anything else is a single record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the underlying source cannot be read.
    fn scrape_all(&self) -> Result<Vec<Value>, CoreError> {
        match self.scrape()? {
            Value::Array(items) => Ok(items),
            other => Ok(vec![other]),
        }
    }
}

/// An in-memory document, handy for fixtures and for callers that already
/// hold the scrape.
impl RawScrapeProvider for Value {
    fn scrape(&self) -> Result<Value, CoreError> {
        Ok(self.clone())
    }
}

/// Reads a scrape that was saved to disk as JSON.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawScrapeProvider for JsonFileProvider {
    fn scrape(&self) -> Result<Value, CoreError> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| CoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&body).map_err(|e| CoreError::Json {
            context: self.path.display().to_string(),
            source: e,
        })
    }
}
