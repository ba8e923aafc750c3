//! Read-through cache of parsed collection files.
//!
//! Several stages of one build read the same raw file. A [`LoadCache`] is
//! created when a run starts and dropped when it ends; files are assumed not
//! to change during a run, but may change between runs, so the cache is
//! never shared across runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;

use super::{io_error, load, save};
use crate::error::GeoprepResult;
use crate::model::FeatureCollection;

/// Hit/miss counters for a [`LoadCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadCacheStats {
    /// Loads served from memory
    pub hits: u64,
    /// Loads that read the file
    pub misses: u64,
    /// Files currently held
    pub entries: usize,
}

impl LoadCacheStats {
    /// Fraction of loads served from memory, 0.0 when nothing was loaded.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Per-run cache of parsed files keyed by canonical path.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, Arc<FeatureCollection>>,
    hits: u64,
    misses: u64,
}

impl LoadCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, parsing it only the first time it is requested.
    ///
    /// # Errors
    ///
    /// Same as [`load`](super::load); failures are not cached.
    pub fn load(&mut self, path: &Path) -> GeoprepResult<Arc<FeatureCollection>> {
        let key = identity(path)?;

        if let Some(collection) = self.entries.get(&key) {
            self.hits += 1;
            trace!(path = %key.display(), "Load cache hit");
            return Ok(Arc::clone(collection));
        }

        self.misses += 1;
        let collection = Arc::new(load(path)?);
        self.entries.insert(key, Arc::clone(&collection));
        Ok(collection)
    }

    /// Save `collection` to `path` and drop any cached copy of that file.
    pub fn save(&mut self, collection: &FeatureCollection, path: &Path) -> GeoprepResult<()> {
        save(collection, path)?;
        self.invalidate(path);
        Ok(())
    }

    /// Forget a single file.
    pub fn invalidate(&mut self, path: &Path) {
        if let Ok(key) = identity(path) {
            self.entries.remove(&key);
        }
    }

    /// Forget every file and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Returns true if `path` is currently cached.
    pub fn contains(&self, path: &Path) -> bool {
        identity(path).is_ok_and(|key| self.entries.contains_key(&key))
    }

    /// Current counters.
    pub fn stats(&self) -> LoadCacheStats {
        LoadCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

/// Files are identified by their canonical path so that `data/x` and
/// `./data/x` share one entry.
fn identity(path: &Path) -> GeoprepResult<PathBuf> {
    fs::canonicalize(path).map_err(|source| io_error(path, source))
}
