//! Canonical record reconciliation.
//!
//! A recording on disk is described by up to three partially-authoritative
//! sources: its file name, its sidecar, and the audio stream itself. The
//! engine merges them into one canonical [`RecordingRecord`] using a fixed
//! fallback precedence:
//!
//! - timestamp: filename-parsed timestamp, else the file's last-modified time
//! - title: sidecar title, else a degraded-recovery title, else the humanized
//!   file name
//! - duration: sidecar duration when positive, else a fresh probe (0 when the
//!   probe fails)

use crate::catalog::filename::{self, ParsedName};
use crate::catalog::probe::MediaProbe;
use crate::catalog::sidecar::SidecarData;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// One recording as presented to the rest of the application, and the exact
/// JSON shape written to sidecar files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingRecord {
    /// Timestamp-derived identifier, equal to `timestamp_millis`
    pub id: i64,
    pub file_path: PathBuf,
    pub file_name: String,
    pub title: String,
    pub timestamp_millis: i64,
    pub duration_millis: u64,
}

pub struct ReconciliationEngine<P> {
    probe: P,
}

impl<P: MediaProbe> ReconciliationEngine<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Builds the canonical record for one audio file.
    ///
    /// # Errors
    /// - If the file's metadata cannot be read (vanished mid-scan, permission)
    pub fn reconcile(
        &self,
        audio_path: &Path,
        parsed: &ParsedName,
        sidecar: Option<&SidecarData>,
    ) -> io::Result<RecordingRecord> {
        let timestamp_millis = match parsed.timestamp_millis {
            Some(millis) => millis,
            None => modified_millis(audio_path)?,
        };

        let title = sidecar
            .and_then(sidecar_title)
            .unwrap_or_else(|| filename::humanized_title(parsed));

        let duration_millis = match sidecar {
            Some(SidecarData::Intact(record)) if record.duration_millis > 0 => {
                record.duration_millis
            }
            _ => self.probe.probe(audio_path),
        };

        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.{}", parsed.base_name, parsed.extension));

        Ok(RecordingRecord {
            id: timestamp_millis,
            file_path: audio_path.to_path_buf(),
            file_name,
            title,
            timestamp_millis,
            duration_millis,
        })
    }
}

/// Non-blank sidecar title, whether the sidecar parsed cleanly or only its
/// title survived the degraded scan.
fn sidecar_title(sidecar: &SidecarData) -> Option<String> {
    let title = match sidecar {
        SidecarData::Intact(record) => &record.title,
        SidecarData::Degraded { title } => title,
    };
    let trimmed = title.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Last-modified time in milliseconds since the Unix epoch.
fn modified_millis(path: &Path) -> io::Result<i64> {
    let modified = fs::metadata(path)?.modified()?;
    let since_epoch = modified.duration_since(UNIX_EPOCH).unwrap_or_default();
    Ok(since_epoch.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDateTime, TimeZone};

    struct StubProbe(u64);

    impl MediaProbe for StubProbe {
        fn probe(&self, _path: &Path) -> u64 {
            self.0
        }
    }

    fn parsed(name: &str) -> ParsedName {
        filename::parse(name).unwrap()
    }

    fn intact(title: &str, duration_millis: u64) -> SidecarData {
        SidecarData::Intact(RecordingRecord {
            id: 1,
            file_path: PathBuf::from("/tmp/x.m4a"),
            file_name: "x.m4a".to_string(),
            title: title.to_string(),
            timestamp_millis: 1,
            duration_millis,
        })
    }

    #[test]
    fn no_sidecar_synthesizes_from_filename() {
        let engine = ReconciliationEngine::new(StubProbe(42_000));
        let name = "Recording_2024-05-01_09-30-00.m4a";
        let record = engine
            .reconcile(Path::new(name), &parsed(name), None)
            .unwrap();

        let expected_millis = Local
            .from_local_datetime(
                &NaiveDateTime::parse_from_str("2024-05-01_09-30-00", "%Y-%m-%d_%H-%M-%S").unwrap(),
            )
            .earliest()
            .unwrap()
            .timestamp_millis();

        assert_eq!(record.title, "2024-05-01 09 30 00");
        assert_eq!(record.timestamp_millis, expected_millis);
        assert_eq!(record.id, expected_millis);
        assert_eq!(record.duration_millis, 42_000);
    }

    #[test]
    fn intact_sidecar_wins_for_title_and_duration() {
        let engine = ReconciliationEngine::new(StubProbe(9_999));
        let name = "Recording_2024-05-01_09-30-00.m4a";
        let sidecar = intact("Quantum Mechanics II", 3_600_000);
        let record = engine
            .reconcile(Path::new(name), &parsed(name), Some(&sidecar))
            .unwrap();

        assert_eq!(record.title, "Quantum Mechanics II");
        assert_eq!(record.duration_millis, 3_600_000);
    }

    #[test]
    fn zero_sidecar_duration_falls_back_to_probe() {
        let engine = ReconciliationEngine::new(StubProbe(7_500));
        let name = "Recording_2024-05-01_09-30-00.m4a";
        let sidecar = intact("Quantum Mechanics II", 0);
        let record = engine
            .reconcile(Path::new(name), &parsed(name), Some(&sidecar))
            .unwrap();

        assert_eq!(record.duration_millis, 7_500);
    }

    #[test]
    fn blank_sidecar_title_falls_back_to_filename() {
        let engine = ReconciliationEngine::new(StubProbe(0));
        let name = "Recording_2024-05-01_09-30-00.m4a";
        let sidecar = intact("   ", 1_000);
        let record = engine
            .reconcile(Path::new(name), &parsed(name), Some(&sidecar))
            .unwrap();

        assert_eq!(record.title, "2024-05-01 09 30 00");
    }

    #[test]
    fn degraded_sidecar_contributes_its_title() {
        let engine = ReconciliationEngine::new(StubProbe(500));
        let name = "Recording_2024-05-01_09-30-00.m4a";
        let sidecar = SidecarData::Degraded {
            title: "Physics 101".to_string(),
        };
        let record = engine
            .reconcile(Path::new(name), &parsed(name), Some(&sidecar))
            .unwrap();

        assert_eq!(record.title, "Physics 101");
        // the degraded sidecar has no duration, so the probe supplies it
        assert_eq!(record.duration_millis, 500);
    }

    #[test]
    fn unparseable_name_uses_modified_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Recording_guest_lecture.m4a");
        std::fs::write(&path, b"stub").unwrap();

        let engine = ReconciliationEngine::new(StubProbe(0));
        let record = engine
            .reconcile(&path, &parsed("Recording_guest_lecture.m4a"), None)
            .unwrap();

        assert!(record.timestamp_millis > 0);
        assert_eq!(record.title, "guest lecture");
    }
}
