use reqwest::{Client, Url};

use super::error::ApiError;
use super::schema::{ActionResponse, HealthResponse, QueryRequest, QueryResponse};

const QUERY_PATH: &str = "api/query";
const SCRAPE_PATH: &str = "api/scrape";
const CLEAR_PATH: &str = "api/clear";
const HEALTH_PATH: &str = "api/health";

/// HTTP client for the RAG backend.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool,
/// so each background task gets its own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the backend at `api_base` (e.g. `http://localhost:8000`)
    pub fn new(api_base: &str) -> Result<Self, ApiError> {
        // Url::join drops the last path segment unless the base ends with a slash
        let normalized = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{api_base}/")
        };

        let base = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    /// The backend origin every endpoint is joined onto
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a path or URL against the backend origin.
    /// Absolute URLs are returned as-is.
    pub fn resolve(&self, reference: &str) -> Result<Url, ApiError> {
        self.base.join(reference).map_err(|e| ApiError::InvalidUrl {
            url: reference.to_string(),
            reason: e.to_string(),
        })
    }

    /// `POST /api/query` with `{"query": ...}`
    ///
    /// The status code is not inspected: whatever JSON comes back is decoded
    /// with optional-field defaults, and only a decode failure is an error.
    pub async fn query(&self, query: String) -> Result<QueryResponse, ApiError> {
        let url = self.resolve(QUERY_PATH)?;
        tracing::debug!(%url, "sending query");

        let response = self
            .http
            .post(url)
            .json(&QueryRequest { query })
            .send()
            .await?;

        Ok(response.json::<QueryResponse>().await?)
    }

    /// `POST /api/scrape` with no body
    pub async fn scrape(&self) -> Result<ActionResponse, ApiError> {
        self.post_action(SCRAPE_PATH).await
    }

    /// `POST /api/clear` with no body
    pub async fn clear(&self) -> Result<ActionResponse, ApiError> {
        self.post_action(CLEAR_PATH).await
    }

    async fn post_action(&self, path: &str) -> Result<ActionResponse, ApiError> {
        let url = self.resolve(path)?;
        tracing::debug!(%url, "triggering backend action");

        let response = self.http.post(url).send().await?;
        Ok(response.json::<ActionResponse>().await?)
    }

    /// `GET /api/health`
    ///
    /// Unlike the other calls, a non-success status is an error here.
    /// Whether the decoded status is "ok" is left to the caller.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.resolve(HEALTH_PATH)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.json::<HealthResponse>().await?)
    }

    /// Download a gallery image.
    ///
    /// `reference` may be an absolute URL or a path relative to the backend
    /// origin. The bytes are sniffed so an HTML error page never reaches the
    /// image widget.
    pub async fn fetch_image(&self, reference: String) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve(&reference)?;

        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        if image::guess_format(&bytes).is_err() {
            return Err(ApiError::NotAnImage(reference));
        }

        Ok(bytes.to_vec())
    }
}
