//! Error types for the Lark integration.

/// Error from Lark Open API operations.
#[derive(Debug, thiserror::Error)]
pub enum LarkError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The API answered with a non-zero business code.
    #[error("Lark API error {code}: {msg}")]
    Api {
        /// Business error code.
        code: i64,
        /// Error message returned by the API.
        msg: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is neither a document token nor a document URL.
    #[error("invalid document reference: {0}")]
    InvalidDocument(String),
}
