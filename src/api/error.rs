use thiserror::Error;

/// Errors from a backend call.
///
/// Every variant carries a rendered message rather than the source error so
/// the whole enum stays `Clone` and can travel inside an application `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset...)
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status code
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The body could not be decoded as the expected JSON payload
    #[error("could not decode response: {0}")]
    Decode(String),

    /// An endpoint or image URL could not be built
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A downloaded gallery image is not in a recognised image format
    #[error("downloaded data from {0} is not an image")]
    NotAnImage(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
