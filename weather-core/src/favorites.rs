//! Saved locations, persisted as one JSON array.
//!
//! The list is append-ordered and never holds two entries that are equal
//! after trimming. Every mutation writes the whole list back to storage.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

/// Durable home for the serialized favorites list.
pub trait FavoritesStorage {
    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces whatever was stored before.
    fn write(&mut self, contents: &str) -> Result<()>;
}

/// Stores the list in a single JSON file, creating parent directories on write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read favorites file: {}", self.path.display()))?;

        Ok(Some(contents))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create favorites directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write favorites file: {}", self.path.display()))
    }
}

/// Keeps the list in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl FavoritesStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadySaved,
    Empty,
}

#[derive(Debug)]
pub struct FavoritesStore<S: FavoritesStorage> {
    locations: Vec<String>,
    storage: S,
}

impl<S: FavoritesStorage> FavoritesStore<S> {
    /// Restore the list from storage. Nothing stored yet means an empty list.
    pub fn load(storage: S) -> Result<Self> {
        let locations = match storage.read()? {
            Some(contents) if !contents.trim().is_empty() => {
                serde_json::from_str(&contents).context("Failed to parse saved favorites")?
            }
            _ => Vec::new(),
        };

        Ok(Self { locations, storage })
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn contains(&self, location: &str) -> bool {
        let trimmed = location.trim();
        self.locations.iter().any(|saved| saved == trimmed)
    }

    pub fn add(&mut self, location: &str) -> AddOutcome {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(trimmed) {
            return AddOutcome::AlreadySaved;
        }

        self.locations.push(trimmed.to_string());
        self.persist_best_effort();
        AddOutcome::Added
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, location: &str) -> bool {
        let trimmed = location.trim();
        let Some(index) = self.locations.iter().position(|saved| saved == trimmed) else {
            return false;
        };

        self.locations.remove(index);
        self.persist_best_effort();
        true
    }

    /// Write the full list, overwriting what was stored before.
    pub fn persist(&mut self) -> Result<()> {
        let json =
            serde_json::to_string(&self.locations).context("Failed to serialize favorites")?;
        self.storage.write(&json)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_best_effort(&mut self) {
        if let Err(err) = self.persist() {
            tracing::warn!("Favorites were not saved: {err:#}");
        }
    }
}
