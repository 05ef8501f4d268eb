use serde::{Deserialize, Serialize};

/// One place from the postal-code dataset.
///
/// `name` is composed as `"<office>, <district>"`. Coordinates that were missing
/// or unparseable in the source are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub postal_code: String,
    pub district: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// A row as it appears in the source file. Absent columns read as empty strings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SourceRow {
    #[serde(rename = "Post Office", default)]
    pub office: String,
    #[serde(rename = "District", default)]
    pub district: String,
    #[serde(rename = "Postal/Pin Code", default)]
    pub postal_code: String,
    #[serde(rename = "Latitude", default)]
    pub latitude: String,
    #[serde(rename = "Longitude", default)]
    pub longitude: String,
}

impl From<SourceRow> for PlaceRecord {
    fn from(row: SourceRow) -> Self {
        Self {
            name: format!("{}, {}", row.office, row.district),
            lat: parse_coordinate(&row.latitude),
            lon: parse_coordinate(&row.longitude),
            postal_code: row.postal_code,
            district: row.district,
        }
    }
}

/// Coerces a raw coordinate cell. Empty, non-numeric and non-finite values become `None`.
pub(crate) fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
