//! Favorite places, persisted through a `KeyValueStore`.

use crate::storage::KeyValueStore;
use skycast_core::StorageError;
use std::sync::Arc;

/// Storage key holding the JSON list of favorite names
pub const FAVORITES_KEY: &str = "weatherFavs";

/// Insertion-ordered, duplicate-free list of place names.
///
/// Every mutation is written back before it returns; a failed write rolls
/// the in-memory list back so it always matches what is stored.
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    names: Vec<String>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Read favorites from storage. Absent or malformed data yields an empty list.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let names = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(stored) => dedup(stored),
                Err(e) => {
                    tracing::warn!("Ignoring malformed favorites: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read favorites: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} favorites", names.len());
        Self { store, names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append `name` unless it is already present. Blank names are ignored,
    /// matching what `load` would keep.
    pub fn add(&mut self, name: &str) -> Result<(), StorageError> {
        if name.trim().is_empty() {
            tracing::debug!("Ignoring blank favorite name");
            return Ok(());
        }
        if self.contains(name) {
            return Ok(());
        }

        self.names.push(name.to_string());
        if let Err(e) = self.persist() {
            self.names.pop();
            return Err(e);
        }

        tracing::info!("Added favorite: {}", name);
        Ok(())
    }

    /// Remove `name` if present.
    pub fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        let Some(index) = self.names.iter().position(|n| n == name) else {
            return Ok(());
        };

        let removed = self.names.remove(index);
        if let Err(e) = self.persist() {
            self.names.insert(index, removed);
            return Err(e);
        }

        tracing::info!("Removed favorite: {}", name);
        Ok(())
    }

    /// Flip membership of `name`, returning whether it is now a favorite.
    pub fn toggle(&mut self, name: &str) -> Result<bool, StorageError> {
        if self.contains(name) {
            self.remove(name)?;
            Ok(false)
        } else {
            self.add(name)?;
            Ok(self.contains(name))
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.names)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

fn dedup(stored: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(stored.len());
    for name in stored {
        if !name.trim().is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
