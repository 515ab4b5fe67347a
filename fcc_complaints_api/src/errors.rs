//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request URL could not be built from the base URL and resource.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// An HTTP request failed (connection refused, timeout, or body read error).
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not a JSON array of records.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}
