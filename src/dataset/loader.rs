//! Dataset Loader
//!
//! Parses the postal-code CSV and keeps the result for the lifetime of the process.
//!
//! ## Responsibilities
//! - **Parsing**: Header-driven CSV decoding; short rows are tolerated.
//! - **Coercion**: Bad latitude/longitude cells are absorbed as "no value".
//! - **Caching**: `DatasetCache` loads at most once, even under concurrent first access.

use super::types::{PlaceRecord, SourceRow};

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Reads every row of `reader` into place records, preserving row order.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<PlaceRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<SourceRow>() {
        records.push(PlaceRecord::from(row?));
    }
    Ok(records)
}

pub fn load_from_path(path: &Path) -> Result<Vec<PlaceRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(std::io::BufReader::new(file))
}

/// Process-lifetime cache around the dataset file.
///
/// The first call to [`DatasetCache::load`] reads the file on the blocking pool;
/// concurrent callers wait on the same initialisation and every caller observes
/// the same `Arc`. A failed load leaves the cache empty.
pub struct DatasetCache {
    path: PathBuf,
    records: OnceCell<Arc<[PlaceRecord]>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: OnceCell::new(),
        }
    }

    /// A cache that is already initialised with `records` and never touches the filesystem.
    pub fn preloaded(records: Vec<PlaceRecord>) -> Self {
        Self {
            path: PathBuf::new(),
            records: OnceCell::from(Arc::<[PlaceRecord]>::from(records)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Arc<[PlaceRecord]>, DatasetError> {
        let records = self
            .records
            .get_or_try_init(|| async {
                let path = self.path.clone();
                tracing::info!("Loading dataset from {}", path.display());

                let records = tokio::task::spawn_blocking(move || load_from_path(&path)).await??;

                tracing::info!("Loaded {} places", records.len());
                Ok::<_, DatasetError>(Arc::from(records))
            })
            .await?;

        Ok(Arc::clone(records))
    }

    /// Returns the records if the dataset has already been loaded.
    pub fn get(&self) -> Option<Arc<[PlaceRecord]>> {
        self.records.get().cloned()
    }
}
