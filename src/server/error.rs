//! HTTP error classification.
//!
//! One classification function maps every non-2xx status and transport
//! failure to a fixed taxonomy, shared by upload, fetch and delete calls.
//! Call sites must not invent their own status-code mappings.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 400
    #[error("server rejected the request as malformed: {0}")]
    MalformedRequest(String),
    /// HTTP 401
    #[error("authentication required. Check the configured API key")]
    Unauthenticated,
    /// HTTP 403
    #[error("access forbidden for this account")]
    Forbidden,
    /// HTTP 404
    #[error("not found on the server")]
    NotFound,
    /// HTTP 415
    #[error("the server does not accept this media type")]
    UnsupportedMediaType,
    /// Any 5xx
    #[error("server error (status {0}). Try again later")]
    Server(u16),
    /// Connection, TLS or timeout failure before an HTTP status arrived
    #[error("network unreachable: {0}")]
    Network(String),
    /// Anything else the server returned
    #[error("unexpected response (status {status}): {body}")]
    Unexpected { status: u16, body: String },
    /// A local file could not be opened or read for the request
    #[error("file unavailable: {0}")]
    File(#[from] std::io::Error),
}

/// Maps a non-success HTTP status plus its raw body to the error taxonomy.
pub fn classify_status(status: StatusCode, body: String) -> ApiError {
    match status.as_u16() {
        400 => ApiError::MalformedRequest(body),
        401 => ApiError::Unauthenticated,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        415 => ApiError::UnsupportedMediaType,
        code if status.is_server_error() => ApiError::Server(code),
        code => ApiError::Unexpected { status: code, body },
    }
}

/// Maps a reqwest transport failure (no HTTP status available).
pub fn classify_transport(e: reqwest::Error) -> ApiError {
    let detail = if e.is_connect() {
        format!("could not connect to the server: {e}")
    } else if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        e.to_string()
    };
    ApiError::Network(detail)
}
