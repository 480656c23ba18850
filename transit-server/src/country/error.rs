//! Country API error types.

/// Errors that can occur when interacting with the REST Countries API.
#[derive(Debug, thiserror::Error)]
pub enum CountryError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("countries API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The queried country was not in the response
    #[error("country not found")]
    NotFound,
}
