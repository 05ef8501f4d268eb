use crate::api::validate::{require_min_chars, require_range};
use crate::errors::ApiError;
use serde::{Deserialize, Serialize};

pub const MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_LIMIT: usize = 5;
pub const MAX_SEARCH_LIMIT: usize = 50;
pub const MAX_AUTOCOMPLETE_LIMIT: usize = 20;

// --- Raw query strings ---

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AdvancedSearchParams {
    pub q: Option<String>,
    pub district: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// --- Validated queries ---

#[derive(Debug, Clone, PartialEq)]
pub struct BasicQuery {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteQuery {
    pub query: String,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedQuery {
    pub query: Option<String>,
    pub district: Option<String>,
    /// `None` when the caller asked for a field we do not sort on.
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

impl SearchParams {
    pub fn validate(self) -> Result<BasicQuery, ApiError> {
        require_min_chars("q", &self.q, MIN_QUERY_CHARS)?;
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        require_range("limit", limit, 1, MAX_SEARCH_LIMIT)?;

        Ok(BasicQuery {
            query: self.q,
            limit,
            offset: self.offset.unwrap_or(0),
        })
    }
}

impl AutocompleteParams {
    pub fn validate(self) -> Result<AutocompleteQuery, ApiError> {
        require_min_chars("q", &self.q, MIN_QUERY_CHARS)?;
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        require_range("limit", limit, 1, MAX_AUTOCOMPLETE_LIMIT)?;

        Ok(AutocompleteQuery {
            query: self.q,
            limit,
        })
    }
}

impl AdvancedSearchParams {
    pub fn validate(self) -> Result<AdvancedQuery, ApiError> {
        if let Some(q) = &self.q {
            require_min_chars("q", q, MIN_QUERY_CHARS)?;
        }
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        require_range("limit", limit, 1, MAX_SEARCH_LIMIT)?;

        Ok(AdvancedQuery {
            query: self.q,
            district: self.district,
            sort_by: SortField::parse(self.sort_by.as_deref().unwrap_or("name")),
            sort_order: SortOrder::parse(self.sort_order.as_deref().unwrap_or("asc")),
            limit,
            offset: self.offset.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    PostalCode,
    District,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(SortField::Name),
            "postal_code" => Some(SortField::PostalCode),
            "district" => Some(SortField::District),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only the exact token `desc` sorts descending.
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

// --- Upstream geocoder payloads ---

/// One result from the geocoding service, as delivered on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeHit {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub address: AddressDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressDetails {
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A filtered, resolved result of an advanced search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRecord {
    pub name: String,
    pub postal_code: String,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub district: String,
}
