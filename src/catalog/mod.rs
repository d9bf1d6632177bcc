//! Local recording catalog.
//!
//! Reconciles the two independently-written artifacts of every recording (the
//! audio file and its optional JSON metadata sidecar) into canonical records,
//! and keeps the pair consistent when recordings are deleted.

pub mod deletion;
pub mod filename;
pub mod probe;
pub mod reconcile;
pub mod scanner;
pub mod sidecar;

pub use deletion::DeletionCoordinator;
pub use filename::ParsedName;
pub use probe::{LoftyProbe, MediaProbe};
pub use reconcile::{ReconciliationEngine, RecordingRecord};
pub use scanner::CatalogScanner;
pub use sidecar::{SidecarData, SidecarError, SidecarStore};
