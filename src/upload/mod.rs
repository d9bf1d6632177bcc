//! Upload machinery.
//!
//! Streams a recording to the summarization server as a multipart request,
//! reporting deduplicated progress and exactly one terminal result through a
//! cancellable session.

pub mod pipeline;
pub mod progress;
pub mod session;

pub use pipeline::{UploadPipeline, UploadRequest};
pub use progress::ProgressTracker;
pub use session::{UploadEvent, UploadSession};
