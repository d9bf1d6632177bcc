//! Delete command: remove recordings together with their sidecars.

use crate::catalog::{CatalogScanner, DeletionCoordinator};
use crate::config::LecternConfig;
use std::path::PathBuf;

/// Deletes the given recordings from the catalog.
///
/// Paths may be absolute, relative to the working directory, or bare file
/// names resolved against the recordings directory. Each recording is
/// deleted independently; the command fails if any of them could not be
/// fully removed.
pub async fn handle_delete(files: Vec<PathBuf>) -> anyhow::Result<()> {
    let config = LecternConfig::load()?;
    let recordings_dir = config.recordings_dir()?;
    let catalog = CatalogScanner::new(&recordings_dir).scan();

    let mut targets = Vec::new();
    for file in &files {
        let resolved = if file.exists() {
            file.clone()
        } else {
            recordings_dir.join(file)
        };
        match catalog.iter().find(|record| record.file_path == resolved) {
            Some(record) => targets.push(record.clone()),
            None => anyhow::bail!("Not in the catalog: {}", file.display()),
        }
    }

    if DeletionCoordinator::delete_many(&targets) {
        println!("Deleted {} recording(s)", targets.len());
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Some recordings could not be fully deleted; see the log for details"
        ))
    }
}
