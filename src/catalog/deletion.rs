//! Paired deletion of recordings and sidecars.
//!
//! A recording is deleted as a unit: audio first, then the sidecar. The
//! sidecar is never touched while the audio file still exists because its
//! delete failed. A sidecar delete failure after a successful audio delete is
//! reported but not rolled back, which can leave an orphaned sidecar behind.

use crate::catalog::reconcile::RecordingRecord;
use crate::catalog::sidecar::SidecarStore;
use std::fs;
use std::path::Path;

pub struct DeletionCoordinator;

impl DeletionCoordinator {
    /// Deletes one recording and its sidecar.
    ///
    /// Returns `false` when either artifact fails to delete; an absent
    /// artifact counts as success.
    pub fn delete_one(record: &RecordingRecord) -> bool {
        Self::delete_pair(&record.file_path)
    }

    /// Deletes every recording independently; one failure does not stop the
    /// rest. Returns `true` only when every recording deleted cleanly.
    pub fn delete_many(records: &[RecordingRecord]) -> bool {
        records
            .iter()
            .fold(true, |all_ok, record| Self::delete_one(record) && all_ok)
    }

    fn delete_pair(audio_path: &Path) -> bool {
        if audio_path.exists() {
            if let Err(e) = fs::remove_file(audio_path) {
                tracing::error!("Failed to delete {}: {e}", audio_path.display());
                return false;
            }
            tracing::info!("Deleted {}", audio_path.display());
        } else {
            tracing::debug!("Audio already absent: {}", audio_path.display());
        }

        let sidecar_path = SidecarStore::sidecar_path(audio_path);
        if sidecar_path.exists() {
            if let Err(e) = fs::remove_file(&sidecar_path) {
                // orphaned sidecar: the audio file is already gone
                tracing::error!(
                    "Audio deleted but sidecar remains at {}: {e}",
                    sidecar_path.display()
                );
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn record_for(audio_path: PathBuf) -> RecordingRecord {
        RecordingRecord {
            id: 0,
            file_name: audio_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned(),
            file_path: audio_path,
            title: String::new(),
            timestamp_millis: 0,
            duration_millis: 0,
        }
    }

    fn recording_pair(dir: &Path, stem: &str) -> (PathBuf, PathBuf) {
        let audio = dir.join(format!("{stem}.m4a"));
        let sidecar = dir.join(format!("{stem}.json"));
        fs::write(&audio, b"audio").unwrap();
        fs::write(&sidecar, b"{}").unwrap();
        (audio, sidecar)
    }

    #[test]
    fn deletes_audio_and_sidecar_together() {
        let dir = tempfile::tempdir().unwrap();
        let (audio, sidecar) = recording_pair(dir.path(), "Recording_2024-05-01_09-30-00");

        assert!(DeletionCoordinator::delete_one(&record_for(audio.clone())));
        assert!(!audio.exists());
        assert!(!sidecar.exists());
    }

    #[test]
    fn missing_audio_still_removes_the_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("Recording_2024-05-01_09-30-00.m4a");
        let sidecar = dir.path().join("Recording_2024-05-01_09-30-00.json");
        fs::write(&sidecar, b"{}").unwrap();

        assert!(DeletionCoordinator::delete_one(&record_for(audio)));
        assert!(!sidecar.exists());
    }

    #[test]
    fn fully_absent_recording_deletes_successfully() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("Recording_2024-05-01_09-30-00.m4a");
        assert!(DeletionCoordinator::delete_one(&record_for(audio)));
    }

    #[test]
    fn failed_audio_delete_leaves_the_sidecar_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory where the audio file should be makes
        // remove_file fail without touching permissions
        let audio = dir.path().join("Recording_2024-05-01_09-30-00.m4a");
        fs::create_dir(&audio).unwrap();
        fs::write(audio.join("occupant"), b"x").unwrap();
        let sidecar = dir.path().join("Recording_2024-05-01_09-30-00.json");
        fs::write(&sidecar, b"{}").unwrap();

        assert!(!DeletionCoordinator::delete_one(&record_for(audio)));
        assert!(sidecar.exists());
    }

    #[test]
    fn delete_many_isolates_failures_per_recording() {
        let dir = tempfile::tempdir().unwrap();
        let failing_audio = dir.path().join("Recording_2024-05-01_09-30-00.m4a");
        fs::create_dir(&failing_audio).unwrap();
        fs::write(failing_audio.join("occupant"), b"x").unwrap();
        let failing_sidecar = dir.path().join("Recording_2024-05-01_09-30-00.json");
        fs::write(&failing_sidecar, b"{}").unwrap();

        let (ok_audio, ok_sidecar) = recording_pair(dir.path(), "Recording_2024-05-02_10-00-00");

        let all_ok = DeletionCoordinator::delete_many(&[
            record_for(failing_audio),
            record_for(ok_audio.clone()),
        ]);

        assert!(!all_ok);
        assert!(!ok_audio.exists());
        assert!(!ok_sidecar.exists());
        assert!(failing_sidecar.exists());
    }
}
