//! Search Service Module
//!
//! Answers place lookups in three modes.
//!
//! ## Overview
//! - **Basic search**: Case-insensitive substring match over the local dataset,
//!   ranked by dataset order and paginated over the matched set.
//! - **Autocomplete**: Same matching rule, returning distinct place names.
//! - **Advanced search**: Delegates retrieval to an upstream geocoder, then filters
//!   by postal code, query and district, sorts on one field and paginates locally.
//!
//! There is no tokenization or relevance scoring; matching is plain containment.
//!
//! ## Submodules
//! - **`engine`**: Basic search, autocomplete and pagination over `PlaceRecord`s.
//! - **`advanced`**: The filter-sort-paginate pipeline for upstream results.
//! - **`geocoder`**: The `Geocoder` capability and its Nominatim client.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Query parameters, validated queries and result DTOs.

pub mod advanced;
pub mod engine;
pub mod geocoder;
pub mod handlers;
pub mod types;
