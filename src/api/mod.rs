/// Backend API module
///
/// This module handles all communication with the RAG backend:
/// - Request and response payloads (schema.rs)
/// - The HTTP client for the four endpoints (client.rs)
/// - The flat error taxonomy shared by every call (error.rs)

pub mod client;
pub mod error;
pub mod schema;

pub use client::ApiClient;
pub use error::ApiError;
