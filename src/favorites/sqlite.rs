//! SQLite Favorites Repository
//!
//! Durable backend. One connection guarded by a mutex; every statement runs on the
//! blocking pool so the async runtime is never stalled on disk I/O.
//!
//! Writes go through WAL journaling with `synchronous = FULL`, and the
//! `UNIQUE(user_id, postal_code)` constraint makes the dedup an atomic property of
//! the insert itself (`ON CONFLICT DO NOTHING`).

use super::repository::{FavoritesError, FavoritesRepository};
use super::types::{FavoriteCandidate, FavoriteEntry};

use async_trait::async_trait;
use rusqlite::{Connection, Row, params};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    name TEXT,
    postal_code TEXT NOT NULL,
    lat TEXT,
    lon TEXT,
    district TEXT,
    UNIQUE (user_id, postal_code)
);
";

const SELECT_FOR_OWNER: &str = "
SELECT id, user_id, name, postal_code, lat, lon, district
FROM favorites
WHERE user_id = ?1
ORDER BY id
";

pub struct SqliteFavorites {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteFavorites {
    pub fn open(path: &Path) -> Result<Self, FavoritesError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let connection = Connection::open(path)?;
        Self::initialise(connection)
    }

    pub fn open_in_memory() -> Result<Self, FavoritesError> {
        Self::initialise(Connection::open_in_memory()?)
    }

    fn initialise(connection: Connection) -> Result<Self, FavoritesError> {
        let journal_mode: String =
            connection.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        connection.pragma_update(None, "synchronous", "FULL")?;
        connection.execute_batch(SCHEMA)?;
        tracing::debug!("Favorites store ready (journal_mode={})", journal_mode);

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    async fn with_connection<T, F>(&self, operation: F) -> Result<T, FavoritesError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, FavoritesError> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let mut guard = connection.lock().map_err(|_| FavoritesError::Poisoned)?;
            operation(&mut guard)
        })
        .await?
    }
}

#[async_trait]
impl FavoritesRepository for SqliteFavorites {
    async fn list(&self, owner_key: &str) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let owner_key = owner_key.to_string();
        self.with_connection(move |conn| select_for_owner(conn, &owner_key))
            .await
    }

    async fn add(
        &self,
        owner_key: &str,
        candidate: FavoriteCandidate,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let owner_key = owner_key.to_string();
        self.with_connection(move |conn| {
            let entry = candidate.into_entry(0, &owner_key);
            let inserted = conn.execute(
                "INSERT INTO favorites (user_id, name, postal_code, lat, lon, district)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (user_id, postal_code) DO NOTHING",
                params![
                    entry.owner_key,
                    entry.name,
                    entry.postal_code,
                    entry.lat.as_ref().map(Value::to_string),
                    entry.lon.as_ref().map(Value::to_string),
                    entry.district,
                ],
            )?;
            if inserted == 0 {
                tracing::debug!("Favorite {} already saved for {}", entry.postal_code, owner_key);
            }
            select_for_owner(conn, &owner_key)
        })
        .await
    }

    async fn remove(
        &self,
        owner_key: &str,
        postal_code: &str,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let owner_key = owner_key.to_string();
        let postal_code = postal_code.to_string();
        self.with_connection(move |conn| {
            conn.execute(
                "DELETE FROM favorites WHERE user_id = ?1 AND postal_code = ?2",
                params![owner_key, postal_code],
            )?;
            select_for_owner(conn, &owner_key)
        })
        .await
    }
}

fn select_for_owner(conn: &Connection, owner_key: &str) -> Result<Vec<FavoriteEntry>, FavoritesError> {
    let mut statement = conn.prepare_cached(SELECT_FOR_OWNER)?;
    let rows = statement.query_map(params![owner_key], entry_from_row)?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<FavoriteEntry> {
    Ok(FavoriteEntry {
        id: row.get(0)?,
        owner_key: row.get(1)?,
        name: row.get(2)?,
        postal_code: row.get(3)?,
        lat: row.get::<_, Option<String>>(4)?.map(decode_coordinate),
        lon: row.get::<_, Option<String>>(5)?.map(decode_coordinate),
        district: row.get(6)?,
    })
}

/// Coordinates are stored as JSON text; anything else is returned as a plain string.
fn decode_coordinate(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}
