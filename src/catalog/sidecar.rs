//! JSON metadata sidecars.
//!
//! Every recording may carry a companion metadata file sharing its base name
//! (`Recording_X.m4a` pairs with `Recording_X.json`). Sidecars written by
//! older app versions or interrupted writes can be malformed; reading falls
//! back to a plain-text scan that recovers the title before giving up
//! entirely.

use crate::catalog::reconcile::RecordingRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Literal searched for during degraded title recovery.
const TITLE_MARKER: &str = "\"title\":\"";

#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("sidecar not found")]
    NotFound,
    #[error("sidecar unreadable: structured parse and title recovery both failed")]
    ParseFailed,
    #[error("sidecar I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of reading a sidecar that exists on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum SidecarData {
    /// Structured parse succeeded
    Intact(RecordingRecord),
    /// Structured parse failed but the title was recovered by text scan
    Degraded { title: String },
}

pub struct SidecarStore;

impl SidecarStore {
    /// Path of the sidecar paired with an audio file.
    pub fn sidecar_path(audio_path: &Path) -> PathBuf {
        audio_path.with_extension("json")
    }

    /// Reads and parses a sidecar file.
    ///
    /// A parse failure degrades to a text scan for the `"title":"` marker so
    /// a partially-written sidecar still contributes its title.
    pub fn read(path: &Path) -> Result<SidecarData, SidecarError> {
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SidecarError::NotFound,
            _ => SidecarError::Io(e),
        })?;

        match serde_json::from_str::<RecordingRecord>(&raw) {
            Ok(record) => Ok(SidecarData::Intact(record)),
            Err(e) => {
                tracing::warn!("Malformed sidecar {}: {e}", path.display());
                match recover_title(&raw) {
                    Some(title) => Ok(SidecarData::Degraded { title }),
                    None => Err(SidecarError::ParseFailed),
                }
            }
        }
    }

    /// Serializes the full record and overwrites the sidecar file.
    pub fn write(path: &Path, record: &RecordingRecord) -> Result<(), SidecarError> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)?;
        tracing::debug!("Sidecar written: {}", path.display());
        Ok(())
    }
}

/// Scans raw sidecar text for `"title":"` and extracts up to the next quote.
fn recover_title(raw: &str) -> Option<String> {
    let start = raw.find(TITLE_MARKER)? + TITLE_MARKER.len();
    let end = raw[start..].find('"')?;
    let title = &raw[start..start + end];
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_record(path: &Path) -> RecordingRecord {
        RecordingRecord {
            id: 1714555800000,
            file_path: path.to_path_buf(),
            file_name: "Recording_2024-05-01_09-30-00.m4a".to_string(),
            title: "Linear Algebra".to_string(),
            timestamp_millis: 1714555800000,
            duration_millis: 185_000,
        }
    }

    #[test]
    fn sidecar_path_swaps_extension() {
        let audio = PathBuf::from("/tmp/Recording_2024-05-01_09-30-00.m4a");
        assert_eq!(
            SidecarStore::sidecar_path(&audio),
            PathBuf::from("/tmp/Recording_2024-05-01_09-30-00.json")
        );
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("Recording_2024-05-01_09-30-00.m4a");
        let sidecar = SidecarStore::sidecar_path(&audio);
        let record = sample_record(&audio);

        SidecarStore::write(&sidecar, &record).unwrap();
        match SidecarStore::read(&sidecar).unwrap() {
            SidecarData::Intact(read_back) => {
                assert_eq!(read_back.title, record.title);
                assert_eq!(read_back.duration_millis, record.duration_millis);
            }
            other => panic!("expected intact sidecar, got {other:?}"),
        }
    }

    #[test]
    fn sidecar_uses_exact_wire_field_names() {
        let record = sample_record(Path::new("/tmp/a.m4a"));
        let json = serde_json::to_string(&record).unwrap();
        for field in [
            "\"id\"",
            "\"filePath\"",
            "\"fileName\"",
            "\"title\"",
            "\"timestampMillis\"",
            "\"durationMillis\"",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn malformed_sidecar_recovers_title_by_text_scan() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("Recording_2024-05-01_09-30-00.json");
        fs::write(&sidecar, "{\"id\":12,\"title\":\"Physics 101\",\"trunca").unwrap();

        match SidecarStore::read(&sidecar).unwrap() {
            SidecarData::Degraded { title } => assert_eq!(title, "Physics 101"),
            other => panic!("expected degraded sidecar, got {other:?}"),
        }
    }

    #[test]
    fn unrecoverable_sidecar_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("Recording_2024-05-01_09-30-00.json");
        fs::write(&sidecar, "not json at all").unwrap();

        assert!(matches!(
            SidecarStore::read(&sidecar),
            Err(SidecarError::ParseFailed)
        ));
    }

    #[test]
    fn missing_sidecar_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("Recording_2024-05-01_09-30-00.json");
        assert!(matches!(
            SidecarStore::read(&sidecar),
            Err(SidecarError::NotFound)
        ));
    }
}
