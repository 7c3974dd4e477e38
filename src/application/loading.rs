use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-flight indicator guarding against duplicate order submissions.
#[derive(Debug, Default, Clone)]
pub struct LoadingFlag {
    busy: Arc<AtomicBool>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Raises the flag, or returns `None` if it is already raised.
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Lowers the flag when dropped, whichever way the request ended.
#[derive(Debug)]
pub struct LoadingGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
