// src/errors.rs
use thiserror::Error;

/// Errors surfaced by the judge API collaborators.
///
/// Every manager call resolves to one of these; the UI reacts by leaving its
/// state untouched and showing a single notice. Nothing here is fatal to the
/// process.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered 401. For the current-user lookup this is a normal
    /// state (anonymous visitor), not a failure.
    #[error("not authenticated")]
    Unauthorized,

    #[error("server rejected the request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
