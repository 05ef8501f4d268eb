//! Favorites Module
//!
//! Per-identity saved places with dedup-on-insert.
//!
//! ## Contract
//! - **Scoping**: Every operation takes an opaque `owner_key` from the caller and only
//!   ever reads or writes that owner's entries.
//! - **Uniqueness**: At most one entry per `(owner_key, postal_code)`. A duplicate add
//!   is a silent no-op; removing a missing entry is not an error.
//! - **Results**: `add` and `remove` return the owner's full list after the operation,
//!   in insertion order.
//!
//! ## Submodules
//! - **`repository`**: The `FavoritesRepository` capability and its error type.
//! - **`memory`**: DashMap-backed repository for tests and ephemeral deployments.
//! - **`sqlite`**: Durable SQLite-backed repository.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: `FavoriteEntry` and the client-submitted candidate.

pub mod handlers;
pub mod memory;
pub mod repository;
pub mod sqlite;
pub mod types;

pub use memory::MemoryFavorites;
pub use repository::{FavoritesError, FavoritesRepository};
pub use sqlite::SqliteFavorites;
pub use types::{FavoriteCandidate, FavoriteEntry};
