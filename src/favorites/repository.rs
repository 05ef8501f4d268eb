use super::types::{FavoriteCandidate, FavoriteEntry};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("favorites directory unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("favorites connection lock poisoned")]
    Poisoned,
    #[error("favorites task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Storage for favorites, scoped by owner.
///
/// `add` must be atomic with respect to other operations on the same
/// `(owner_key, postal_code)`: two concurrent adds of a new pair insert one row.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    async fn list(&self, owner_key: &str) -> Result<Vec<FavoriteEntry>, FavoritesError>;

    async fn add(
        &self,
        owner_key: &str,
        candidate: FavoriteCandidate,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError>;

    async fn remove(
        &self,
        owner_key: &str,
        postal_code: &str,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError>;
}
