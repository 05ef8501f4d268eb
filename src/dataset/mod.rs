//! Dataset Module
//!
//! Loads the postal-code source file into an immutable, ordered list of places.
//!
//! ## Overview
//! The source is a delimited file with the columns `Post Office`, `District`,
//! `Postal/Pin Code`, `Latitude` and `Longitude`. Every row becomes one
//! `PlaceRecord`, in file order. Row order matters: basic search ranks by it and
//! autocomplete deduplicates by first occurrence.
//!
//! ## Submodules
//! - **`types`**: `PlaceRecord` and the raw source row.
//! - **`loader`**: CSV parsing, coordinate coercion and the process-lifetime `DatasetCache`.

pub mod loader;
pub mod types;

pub use loader::{DatasetCache, DatasetError, load_from_path, load_from_reader};
pub use types::PlaceRecord;
