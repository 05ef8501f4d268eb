//! Advanced Search Pipeline
//!
//! Shapes the upstream request, then filters, sorts and paginates the results locally.
//! The upstream call is network-bound and not deterministic across calls; no shared
//! state is held while it is in flight.

use super::engine::paginate;
use super::geocoder::Geocoder;
use super::types::{AdvancedQuery, AdvancedRecord, GeocodeHit, SortField, SortOrder};
use crate::errors::UpstreamError;

pub const DISTRICT_PLACEHOLDER: &str = "N/A";
/// Upper bound on the raw result count asked of the geocoder.
pub const MAX_UPSTREAM_LIMIT: usize = 1_000;
const UNKNOWN_NAME: &str = "Unknown";

pub async fn advanced_search(
    geocoder: &dyn Geocoder,
    query: &AdvancedQuery,
) -> Result<Vec<AdvancedRecord>, UpstreamError> {
    let raw_limit = query.limit.saturating_add(query.offset).min(MAX_UPSTREAM_LIMIT);
    let hits = geocoder
        .search(query.query.as_deref().unwrap_or(""), raw_limit)
        .await?;
    tracing::debug!("Geocoder returned {} raw results", hits.len());

    let mut records = filter_hits(hits, query.query.as_deref(), query.district.as_deref());
    if let Some(field) = query.sort_by {
        sort_records(&mut records, field, query.sort_order);
    }

    Ok(paginate(records, query.offset, query.limit))
}

/// Keeps hits that carry a postal code and satisfy the query and district filters.
pub fn filter_hits(
    hits: Vec<GeocodeHit>,
    query: Option<&str>,
    district: Option<&str>,
) -> Vec<AdvancedRecord> {
    let query_lower = query.map(str::to_lowercase);
    let district_lower = district.map(str::to_lowercase);

    hits.into_iter()
        .filter_map(|hit| {
            let postal_code = non_empty(hit.postcode.as_deref())
                .or_else(|| non_empty(hit.address.postcode.as_deref()))?
                .to_string();
            let resolved_district = resolve_district(&hit);
            let display_name = hit.display_name.as_deref().unwrap_or("");

            let query_ok = match (query, &query_lower) {
                (Some(q), Some(q_lower)) => {
                    (is_all_digits(q) && postal_code.starts_with(q))
                        || display_name.to_lowercase().contains(q_lower.as_str())
                }
                _ => true,
            };
            let district_ok = district_lower
                .as_deref()
                .is_none_or(|d| resolved_district.to_lowercase().contains(d));

            if !(query_ok && district_ok) {
                return None;
            }

            Some(AdvancedRecord {
                name: hit
                    .display_name
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                postal_code,
                lat: hit.lat,
                lon: hit.lon,
                district: resolved_district,
            })
        })
        .collect()
}

/// County, else state, else the placeholder.
pub fn resolve_district(hit: &GeocodeHit) -> String {
    non_empty(hit.address.county.as_deref())
        .or_else(|| non_empty(hit.address.state.as_deref()))
        .unwrap_or(DISTRICT_PLACEHOLDER)
        .to_string()
}

/// Stable, case-insensitive sort on one field.
pub fn sort_records(records: &mut [AdvancedRecord], field: SortField, order: SortOrder) {
    let key = |record: &AdvancedRecord| -> String {
        match field {
            SortField::Name => record.name.to_lowercase(),
            SortField::PostalCode => record.postal_code.to_lowercase(),
            SortField::District => record.district.to_lowercase(),
        }
    };

    match order {
        SortOrder::Ascending => records.sort_by_cached_key(key),
        SortOrder::Descending => records.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
