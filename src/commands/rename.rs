//! Rename command: rewrite the sidecar title of a recording.

use crate::catalog::{filename, LoftyProbe, ReconciliationEngine, SidecarError, SidecarStore};
use crate::config::LecternConfig;
use std::path::PathBuf;

/// Sets a new title for a recording.
///
/// The sidecar is rewritten in place; when the recording has no sidecar yet,
/// one is synthesized from the reconciled record so later scans keep the
/// title.
pub fn handle_rename(file: PathBuf, title: String) -> anyhow::Result<()> {
    anyhow::ensure!(!title.trim().is_empty(), "Title must not be blank");

    let config = LecternConfig::load()?;
    let recordings_dir = config.recordings_dir()?;
    let audio_path = if file.exists() {
        file
    } else {
        recordings_dir.join(&file)
    };
    anyhow::ensure!(
        audio_path.is_file(),
        "No such recording: {}",
        audio_path.display()
    );

    let file_name = audio_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let parsed = filename::parse(file_name)
        .ok_or_else(|| anyhow::anyhow!("{file_name} is not a recognized recording file"))?;

    let sidecar_path = SidecarStore::sidecar_path(&audio_path);
    let sidecar = match SidecarStore::read(&sidecar_path) {
        Ok(data) => Some(data),
        Err(SidecarError::NotFound) => None,
        Err(e) => {
            tracing::warn!("Rewriting unreadable sidecar {}: {e}", sidecar_path.display());
            None
        }
    };

    let engine = ReconciliationEngine::new(LoftyProbe);
    let mut record = engine.reconcile(&audio_path, &parsed, sidecar.as_ref())?;
    record.title = title.trim().to_string();
    SidecarStore::write(&sidecar_path, &record)?;

    println!("Renamed {} to \"{}\"", record.file_name, record.title);
    Ok(())
}
