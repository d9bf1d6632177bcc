//! Multipart upload pipeline.
//!
//! Streams the primary audio file to the server's upload endpoint, feeding
//! every written chunk through the [`ProgressTracker`], and resolves into the
//! single terminal event of the session. Transport and HTTP failures are
//! classified by the shared server taxonomy; cancellation drops the in-flight
//! request together with its file handle.

use crate::server::error::{classify_status, classify_transport, ApiError};
use crate::server::ServerLecture;
use crate::upload::progress::{ProgressTracker, UNKNOWN_TOTAL};
use crate::upload::session::{ProgressHandle, UploadSession};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::io::ReaderStream;

/// One upload invocation.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub audio_path: PathBuf,
    /// Optional companion document (e.g. presentation slides)
    pub slides_path: Option<PathBuf>,
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct UploadPipeline {
    client: Client,
    upload_url: String,
    api_key: Option<String>,
}

impl UploadPipeline {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            upload_url: format!("{}/upload", base_url.trim_end_matches('/')),
            api_key,
        }
    }

    /// Starts an upload and returns the session delivering its events.
    ///
    /// There is no resume: a cancelled or failed upload restarts from byte
    /// zero on the next call.
    pub fn upload(&self, request: UploadRequest) -> UploadSession {
        let (feed, session) = UploadSession::channel();
        let cancel = feed.cancellation();
        let client = self.client.clone();
        let url = self.upload_url.clone();
        let api_key = self.api_key.clone();

        tokio::spawn(async move {
            feed.loading().await;
            let progress = feed.progress_handle();
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Upload of {} cancelled", request.audio_path.display());
                    return;
                }
                outcome = perform_upload(&client, &url, api_key.as_deref(), &request, progress) => outcome,
            };
            feed.finish(outcome).await;
        });

        session
    }
}

/// Builds and sends the multipart request. Dropping this future on
/// cancellation closes the streaming file handle.
async fn perform_upload(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
    request: &UploadRequest,
    progress: ProgressHandle,
) -> Result<Option<ServerLecture>, ApiError> {
    let file = tokio::fs::File::open(&request.audio_path).await?;
    let total_bytes = file
        .metadata()
        .await
        .map(|m| m.len() as i64)
        .unwrap_or(UNKNOWN_TOTAL);

    let tracker = Arc::new(Mutex::new(ProgressTracker::new(total_bytes)));
    if let Some(percent) = lock(&tracker).begin() {
        progress.emit(percent);
    }

    let form = build_form(request, file, total_bytes, tracker.clone(), progress.clone()).await?;

    let mut http = client.post(url).multipart(form);
    if let Some(key) = api_key {
        http = http.bearer_auth(key);
    }

    let response = http.send().await.map_err(classify_transport)?;
    if let Some(percent) = lock(&tracker).complete() {
        progress.emit(percent);
    }

    let status = response.status();
    let body = response.text().await.map_err(classify_transport)?;
    if status.is_success() {
        match serde_json::from_str::<ServerLecture>(&body) {
            Ok(lecture) => {
                tracing::info!("Upload accepted as lecture {}", lecture.id);
                Ok(Some(lecture))
            }
            Err(_) => {
                // the server confirmed the upload without structured data
                tracing::debug!("Upload accepted with unstructured response body");
                Ok(None)
            }
        }
    } else {
        Err(classify_status(status, body))
    }
}

async fn build_form(
    request: &UploadRequest,
    file: tokio::fs::File,
    total_bytes: i64,
    tracker: Arc<Mutex<ProgressTracker>>,
    progress: ProgressHandle,
) -> Result<Form, ApiError> {
    let counted = ReaderStream::new(file).map(move |chunk| {
        if let Ok(bytes) = &chunk {
            if let Some(percent) = lock(&tracker).record(bytes.len() as u64) {
                progress.emit(percent);
            }
        }
        chunk
    });

    let body = Body::wrap_stream(counted);
    let part = if total_bytes >= 0 {
        Part::stream_with_length(body, total_bytes as u64)
    } else {
        Part::stream(body)
    };
    let file_part = part
        .file_name(display_name(&request.audio_path))
        .mime_str(audio_mime(&request.audio_path))
        .map_err(|e| ApiError::MalformedRequest(format!("invalid upload part: {e}")))?;

    let mut form = Form::new().part("file", file_part);

    if let Some(slides) = &request.slides_path {
        let bytes = tokio::fs::read(slides).await?;
        let part = Part::bytes(bytes)
            .file_name(display_name(slides))
            .mime_str("application/octet-stream")
            .map_err(|e| ApiError::MalformedRequest(format!("invalid slides part: {e}")))?;
        form = form.part("companionFile", part);
    }
    if let Some(title) = non_blank(request.title.as_deref()) {
        form = form.text("title", title);
    }
    if let Some(description) = non_blank(request.description.as_deref()) {
        form = form.text("description", description);
    }
    Ok(form)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// MIME type for the supported audio extensions.
fn audio_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("aac") => "audio/aac",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

fn lock(tracker: &Arc<Mutex<ProgressTracker>>) -> MutexGuard<'_, ProgressTracker> {
    tracker.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
