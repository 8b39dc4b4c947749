use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use indicatif::ProgressBar;

/// Shared scan counters plus the cooperative cancel flag. Cloning yields a
/// handle to the same state.
#[derive(Clone)]
pub struct ScanProgress {
    inner: Arc<Inner>,
}

struct Inner {
    files_total: AtomicUsize,
    files_processed: AtomicUsize,
    files_skipped: AtomicUsize,
    is_active: AtomicBool,
    cancelled: AtomicBool,
    started_at: Mutex<Option<Instant>>,
    bar: Mutex<Option<ProgressBar>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub is_active: bool,
    pub is_cancelled: bool,
    pub files_total: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub elapsed_ms: u64,
    pub progress_pct: f64,
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanProgress {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                files_total: AtomicUsize::new(0),
                files_processed: AtomicUsize::new(0),
                files_skipped: AtomicUsize::new(0),
                is_active: AtomicBool::new(false),
                cancelled: AtomicBool::new(false),
                started_at: Mutex::new(None),
                bar: Mutex::new(None),
            }),
        }
    }

    /// Mirrors progress onto a terminal bar.
    pub fn attach_bar(&self, bar: ProgressBar) {
        if let Ok(mut slot) = self.inner.bar.lock() {
            *slot = Some(bar);
        }
    }

    pub fn start(&self, total_files: usize) {
        self.inner.files_total.store(total_files, Ordering::Release);
        self.inner.files_processed.store(0, Ordering::Release);
        self.inner.files_skipped.store(0, Ordering::Release);
        self.inner.is_active.store(true, Ordering::Release);
        if let Ok(mut started) = self.inner.started_at.lock() {
            *started = Some(Instant::now());
        }
        self.with_bar(|bar| bar.set_length(total_files as u64));
    }

    pub fn inc(&self) {
        self.inner.files_processed.fetch_add(1, Ordering::Relaxed);
        self.with_bar(|bar| bar.inc(1));
    }

    pub fn inc_skipped(&self) {
        self.inner.files_processed.fetch_add(1, Ordering::Relaxed);
        self.inner.files_skipped.fetch_add(1, Ordering::Relaxed);
        self.with_bar(|bar| bar.inc(1));
    }

    pub fn finish(&self) {
        self.inner.is_active.store(false, Ordering::Release);
        self.with_bar(|bar| bar.finish_and_clear());
    }

    /// Requests cancellation; workers stop at the next file boundary.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let files_total = self.inner.files_total.load(Ordering::Acquire);
        let files_processed = self.inner.files_processed.load(Ordering::Acquire);

        let elapsed_ms = self
            .inner
            .started_at
            .lock()
            .ok()
            .and_then(|started| started.map(|t| t.elapsed().as_millis() as u64))
            .unwrap_or(0);

        let progress_pct = if files_total > 0 {
            (files_processed as f64 / files_total as f64) * 100.0
        } else {
            0.0
        };

        ProgressSnapshot {
            is_active: self.inner.is_active.load(Ordering::Acquire),
            is_cancelled: self.is_cancelled(),
            files_total,
            files_processed,
            files_skipped: self.inner.files_skipped.load(Ordering::Acquire),
            elapsed_ms,
            progress_pct,
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.inner.bar.lock() {
            if let Some(bar) = slot.as_ref() {
                f(bar);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let progress = ScanProgress::new();
        progress.start(4);
        progress.inc();
        progress.inc();
        progress.inc_skipped();

        let snapshot = progress.snapshot();
        assert!(snapshot.is_active);
        assert_eq!(snapshot.files_total, 4);
        assert_eq!(snapshot.files_processed, 3);
        assert_eq!(snapshot.files_skipped, 1);
        assert_eq!(snapshot.progress_pct, 75.0);

        progress.finish();
        assert!(!progress.snapshot().is_active);
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let progress = ScanProgress::new();
        let handle = progress.clone();
        assert!(!progress.is_cancelled());
        handle.cancel();
        assert!(progress.is_cancelled());
        assert!(progress.snapshot().is_cancelled);
    }

    #[test]
    fn test_hidden_bar_tracks_counts() {
        let progress = ScanProgress::new();
        let bar = ProgressBar::hidden();
        progress.attach_bar(bar.clone());
        progress.start(2);
        progress.inc();
        assert_eq!(bar.length(), Some(2));
        assert_eq!(bar.position(), 1);
    }

    #[test]
    fn test_empty_scan_is_zero_percent() {
        let progress = ScanProgress::new();
        progress.start(0);
        assert_eq!(progress.snapshot().progress_pct, 0.0);
    }
}
