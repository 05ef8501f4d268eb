use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A saved place. Fields other than the keys are copied verbatim from the client.
///
/// `id` and `owner_key` are internal and never serialized in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteEntry {
    #[serde(skip_serializing)]
    pub id: i64,
    #[serde(skip_serializing)]
    pub owner_key: String,
    pub name: Option<String>,
    pub postal_code: String,
    pub lat: Option<Value>,
    pub lon: Option<Value>,
    pub district: Option<String>,
}

/// Body of `POST /favorites`. Every field is optional; unknown fields are ignored.
///
/// Text fields accept any JSON value: scalars are stored in their text form, so
/// `44600` and `"44600"` are the same postal code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FavoriteCandidate {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub district: Option<String>,
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_text))
}

/// `null` is absent; strings are taken as-is; anything else becomes its JSON text.
pub fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

impl FavoriteCandidate {
    /// A missing postal code is stored, and deduplicated, as the empty string.
    pub fn postal_code_key(&self) -> &str {
        self.postal_code.as_deref().unwrap_or("")
    }

    pub fn into_entry(self, id: i64, owner_key: &str) -> FavoriteEntry {
        FavoriteEntry {
            id,
            owner_key: owner_key.to_string(),
            postal_code: self.postal_code.unwrap_or_default(),
            name: self.name,
            lat: self.lat.filter(|v| !v.is_null()),
            lon: self.lon.filter(|v| !v.is_null()),
            district: self.district,
        }
    }
}

/// Envelope returned by add and remove.
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub ok: bool,
    pub favorites: Vec<FavoriteEntry>,
}
