use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

/// One card of the browse grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "_id", default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Body of the browse endpoint. Everything except `movies` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub movies: Vec<CatalogEntry>,
}

/// Body of the watch endpoint for a single title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "_id", default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streams: Vec<StreamLink>,
}

/// A landing page on a third-party streaming host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamLink {
    #[serde(rename = "stream", default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl StreamLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Lower-cased host of the landing page, empty when the URL does not parse.
    pub fn host(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_default()
    }
}

/// Joins the image CDN base with a poster path from the API.
pub fn poster_url(image_base: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}

// The API sends `null` for missing strings and lists as often as it omits them.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Ids are opaque; accept numbers as well as strings.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
