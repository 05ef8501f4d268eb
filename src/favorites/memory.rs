use super::repository::{FavoritesError, FavoritesRepository};
use super::types::{FavoriteCandidate, FavoriteEntry};

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory repository. Each owner's list lives under one DashMap entry, so
/// every operation on an owner is serialised by that entry's shard lock.
pub struct MemoryFavorites {
    entries: DashMap<String, Vec<FavoriteEntry>>,
    next_id: AtomicI64,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn owner_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for MemoryFavorites {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoritesRepository for MemoryFavorites {
    async fn list(&self, owner_key: &str) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        Ok(self
            .entries
            .get(owner_key)
            .map(|owned| owned.value().clone())
            .unwrap_or_default())
    }

    async fn add(
        &self,
        owner_key: &str,
        candidate: FavoriteCandidate,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let mut owned = self.entries.entry(owner_key.to_string()).or_default();

        let exists = owned
            .iter()
            .any(|entry| entry.postal_code == candidate.postal_code_key());
        if !exists {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            owned.push(candidate.into_entry(id, owner_key));
        }

        Ok(owned.value().clone())
    }

    async fn remove(
        &self,
        owner_key: &str,
        postal_code: &str,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let Some(mut owned) = self.entries.get_mut(owner_key) else {
            return Ok(Vec::new());
        };

        if let Some(position) = owned.iter().position(|entry| entry.postal_code == postal_code) {
            owned.remove(position);
        }

        Ok(owned.value().clone())
    }
}
