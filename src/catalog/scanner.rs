//! Recording directory scanning.
//!
//! Produces the catalog: one canonical record per supported audio file in the
//! recordings directory, newest first. Scanning is defensive end to end. A
//! missing directory yields an empty catalog and a single unreadable file is
//! skipped without aborting the scan.

use crate::catalog::filename;
use crate::catalog::probe::{LoftyProbe, MediaProbe};
use crate::catalog::reconcile::{ReconciliationEngine, RecordingRecord};
use crate::catalog::sidecar::{SidecarError, SidecarStore};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CatalogScanner<P = LoftyProbe> {
    recordings_dir: PathBuf,
    engine: ReconciliationEngine<P>,
}

impl CatalogScanner<LoftyProbe> {
    pub fn new(recordings_dir: impl Into<PathBuf>) -> Self {
        Self::with_probe(recordings_dir, LoftyProbe)
    }
}

impl<P: MediaProbe> CatalogScanner<P> {
    /// Scanner with a custom duration probe.
    pub fn with_probe(recordings_dir: impl Into<PathBuf>, probe: P) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
            engine: ReconciliationEngine::new(probe),
        }
    }

    /// Scans the recordings directory into a catalog sorted newest first.
    pub fn scan(&self) -> Vec<RecordingRecord> {
        let entries = match fs::read_dir(&self.recordings_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Recordings directory {} not readable: {e}",
                    self.recordings_dir.display()
                );
                return Vec::new();
            }
        };

        let mut records: Vec<RecordingRecord> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                self.scan_file(&path)
            })
            .collect();

        records.sort_by(|a, b| b.timestamp_millis.cmp(&a.timestamp_millis));
        tracing::debug!("Scanned {} recording(s)", records.len());
        records
    }

    /// Reconciles a single directory entry, or `None` when it is filtered out
    /// or failed. Failures are logged here so one bad file never aborts the
    /// surrounding scan.
    fn scan_file(&self, path: &Path) -> Option<RecordingRecord> {
        if !path.is_file() {
            return None;
        }
        let file_name = path.file_name()?.to_str()?;
        let parsed = filename::parse(file_name)?;

        let sidecar = match SidecarStore::read(&SidecarStore::sidecar_path(path)) {
            Ok(data) => Some(data),
            Err(SidecarError::NotFound) => None,
            Err(e) => {
                tracing::warn!("Ignoring sidecar for {file_name}: {e}");
                None
            }
        };

        match self.engine.reconcile(path, &parsed, sidecar.as_ref()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping {file_name}: {e}");
                None
            }
        }
    }
}
