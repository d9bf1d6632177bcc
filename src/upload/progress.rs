//! Upload progress accounting.
//!
//! Turns raw byte counts into the percentage events surfaced to consumers:
//! monotonically non-decreasing, deduplicated, with a guaranteed final 100.
//! When the total size is unknown (sentinel -1) a session reports exactly 0
//! at the start and 100 at completion, nothing in between.

/// Sentinel total for streams whose length is unknown up front.
pub const UNKNOWN_TOTAL: i64 = -1;

/// Deduplicating percentage tracker for one upload session.
#[derive(Debug)]
pub struct ProgressTracker {
    total_bytes: i64,
    written: u64,
    last_emitted: Option<u8>,
}

impl ProgressTracker {
    pub fn new(total_bytes: i64) -> Self {
        Self {
            total_bytes,
            written: 0,
            last_emitted: None,
        }
    }

    /// Called once before any bytes are written. Emits 0 only for
    /// unknown-size sessions.
    pub fn begin(&mut self) -> Option<u8> {
        if self.total_bytes < 0 {
            self.emit(0)
        } else {
            None
        }
    }

    /// Accounts for `bytes` newly written. Returns a percentage when it
    /// changed since the last emission.
    pub fn record(&mut self, bytes: u64) -> Option<u8> {
        self.written = self.written.saturating_add(bytes);
        if self.total_bytes <= 0 {
            return None;
        }
        let percent = (self.written.saturating_mul(100) / self.total_bytes as u64).min(100) as u8;
        self.emit(percent)
    }

    /// Called once all bytes are written. Guarantees the final 100 even when
    /// rounding stopped the write-driven emissions short.
    pub fn complete(&mut self) -> Option<u8> {
        self.emit(100)
    }

    fn emit(&mut self, percent: u8) -> Option<u8> {
        match self.last_emitted {
            // duplicates are suppressed and percentages never go backwards
            Some(last) if percent <= last => None,
            _ => {
                self.last_emitted = Some(percent);
                Some(percent)
            }
        }
    }
}
