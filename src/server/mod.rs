//! Summarization server API.
//!
//! Thin typed wrappers over the server's HTTP endpoints. Every failure, on
//! upload, fetch or delete, goes through the single classification function
//! in [`error`], so callers see one error taxonomy.

pub mod client;
pub mod error;

pub use client::ServerClient;
pub use error::ApiError;

use serde::{Deserialize, Serialize};

/// Lecture record as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerLecture {
    pub id: i64,
    pub title: String,
    /// AI-generated summary, present once processing finished
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
