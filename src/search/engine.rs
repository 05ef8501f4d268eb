use crate::dataset::PlaceRecord;
use std::collections::HashSet;

/// Case-insensitive substring match against name, district or postal code.
///
/// `needle` must already be lowercased.
pub fn matches(record: &PlaceRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.district.to_lowercase().contains(needle)
        || record.postal_code.to_lowercase().contains(needle)
}

/// Records matching `query`, in dataset order, sliced to `[offset, offset + limit)`.
pub fn basic_search<'a>(
    records: &'a [PlaceRecord],
    query: &str,
    limit: usize,
    offset: usize,
) -> Vec<&'a PlaceRecord> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| matches(record, &needle))
        .skip(offset)
        .take(limit)
        .collect()
}

/// Names of matching records, first occurrence wins, truncated to `limit`.
pub fn autocomplete<'a>(records: &'a [PlaceRecord], query: &str, limit: usize) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();

    records
        .iter()
        .filter(|record| matches(record, &needle))
        .map(|record| record.name.as_str())
        .filter(|name| seen.insert(*name))
        .take(limit)
        .collect()
}

/// Slices `items` to `[offset, offset + limit)`; an offset past the end yields nothing.
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}
