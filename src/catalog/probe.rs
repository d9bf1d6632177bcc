//! Media duration probing.
//!
//! The catalog needs a best-effort duration for records whose sidecar carries
//! none. Probing must never fail the caller: any unreadable or unrecognized
//! stream yields a duration of 0.

use lofty::file::AudioFile;
use lofty::probe::Probe;
use std::path::Path;

/// Best-effort duration source for audio files.
pub trait MediaProbe {
    /// Duration in milliseconds, or 0 when it cannot be determined. Never
    /// fails; the file handle is released before returning.
    fn probe(&self, path: &Path) -> u64;
}

/// Production probe backed by `lofty`'s format readers.
#[derive(Debug, Default)]
pub struct LoftyProbe;

impl MediaProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> u64 {
        match read_duration(path) {
            Ok(millis) => millis,
            Err(e) => {
                tracing::debug!("Duration probe failed for {}: {e}", path.display());
                0
            }
        }
    }
}

fn read_duration(path: &Path) -> lofty::error::Result<u64> {
    let tagged = Probe::open(path)?.read()?;
    Ok(tagged.properties().duration().as_millis() as u64)
}
