//! Thin client for the server's lecture endpoints.
//!
//! List, detail and delete are plain JSON calls; the interesting streaming
//! path lives in the upload pipeline. All failure paths go through the shared
//! classification in [`super::error`].

use super::error::{classify_status, classify_transport, ApiError};
use super::ServerLecture;
use reqwest::{Client, RequestBuilder, Response};

pub struct ServerClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ServerClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Lists all lectures known to the server.
    pub async fn list(&self) -> Result<Vec<ServerLecture>, ApiError> {
        let url = format!("{}/lectures", self.base_url);
        let response = self.send(self.authorize(self.client.get(&url))).await?;
        response.json().await.map_err(|e| ApiError::Unexpected {
            status: 200,
            body: format!("unparseable lecture list: {e}"),
        })
    }

    /// Fetches one lecture, including its summary when ready.
    pub async fn detail(&self, id: i64) -> Result<ServerLecture, ApiError> {
        let url = format!("{}/lectures/{id}", self.base_url);
        let response = self.send(self.authorize(self.client.get(&url))).await?;
        response.json().await.map_err(|e| ApiError::Unexpected {
            status: 200,
            body: format!("unparseable lecture: {e}"),
        })
    }

    /// Deletes a lecture on the server.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/lectures/{id}", self.base_url);
        self.send(self.authorize(self.client.delete(&url))).await?;
        Ok(())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(classify_transport)?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, body))
    }
}
