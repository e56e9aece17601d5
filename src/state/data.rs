/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer. They are built from the raw
/// payloads once, when a query response arrives.

use std::path::PathBuf;

use reqwest::Url;

use crate::api::schema::{ImagePayload, SourcePayload};

/// Alt text shown when an image carries no caption
pub const DEFAULT_IMAGE_ALT: &str = "Relevant image";

/// Where a gallery image is loaded from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Absolute URL, or a path relative to the backend origin
    Remote(String),
    /// File on the local disk
    Local(PathBuf),
}

/// Represents a single image in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub source: ImageSource,
    pub caption: Option<String>,
}

impl ImageEntry {
    /// Build a gallery entry, preferring `image_url` over `local_path`.
    /// Returns None when the payload names neither.
    pub fn from_payload(payload: ImagePayload) -> Option<Self> {
        let source = match (non_empty(payload.image_url), non_empty(payload.local_path)) {
            (Some(url), _) => ImageSource::Remote(url),
            (None, Some(path)) => ImageSource::Local(PathBuf::from(path)),
            (None, None) => return None,
        };

        Some(Self {
            source,
            caption: non_empty(payload.caption),
        })
    }

    /// Caption, or the generic alt text
    pub fn alt_text(&self) -> &str {
        self.caption.as_deref().unwrap_or(DEFAULT_IMAGE_ALT)
    }
}

/// Represents a single source link
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLink {
    pub url: String,
    /// Title when the backend gave one, otherwise the URL itself
    pub label: String,
}

impl From<SourcePayload> for SourceLink {
    fn from(payload: SourcePayload) -> Self {
        let label = non_empty(payload.title).unwrap_or_else(|| payload.url.clone());
        Self {
            url: payload.url,
            label,
        }
    }
}

/// Only absolute http(s) URLs are handed to the system browser
pub fn is_web_link(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
