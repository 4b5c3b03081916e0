use thiserror::Error;

/// Errors returned by the intake service client.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid intake base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
