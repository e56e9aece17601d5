/// Request and response payloads for the backend API
///
/// The backend is loose about its JSON: list fields can be missing or null,
/// and individual entries can omit any key. Everything optional is defaulted
/// here, at the boundary, so the rest of the app only sees concrete values.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/query`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub query: String,
}

/// Response of `POST /api/query`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    /// Markdown answer text (empty when the backend omits it)
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImagePayload>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourcePayload>,
}

/// One retrieved image as the backend reports it
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ImagePayload {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// One source document as the backend reports it
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SourcePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `POST /api/scrape` and `POST /api/clear`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ActionResponse {
    /// Human-readable result message
    #[serde(default)]
    pub detail: Option<String>,
}

/// Response of `GET /api/health`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// The backend reports itself healthy only with the literal status "ok"
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
