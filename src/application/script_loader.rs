use crate::domain::notification::{Notification, SCRIPT_LOAD_FAILED};
use crate::domain::ports::{NotifierRef, ScriptSourceRef};
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Where the session's checkout script load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Not loaded yet, or the load is still running.
    Pending,
    Ready,
    /// The load failed; it is not retried this session.
    Failed,
}

/// Loads the checkout script once per session and remembers how it went.
///
/// Concurrent and repeated calls to [`ScriptLoader::load`] share the first
/// attempt. A failed load is never retried, so submission stays disabled
/// for the rest of the session.
pub struct ScriptLoader {
    source: ScriptSourceRef,
    notifier: NotifierRef,
    loaded: OnceCell<bool>,
}

impl ScriptLoader {
    pub fn new(source: ScriptSourceRef, notifier: NotifierRef) -> Self {
        Self {
            source,
            notifier,
            loaded: OnceCell::new(),
        }
    }

    /// Runs the load if it has not run yet and reports readiness.
    pub async fn load(&self) -> bool {
        *self
            .loaded
            .get_or_init(|| async {
                match self.source.load().await {
                    Ok(()) => {
                        info!("checkout script loaded");
                        true
                    }
                    Err(e) => {
                        error!(error = %e, "checkout script failed to load");
                        self.notifier.notify(Notification::error(SCRIPT_LOAD_FAILED));
                        false
                    }
                }
            })
            .await
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.get() == Some(&true)
    }

    pub fn has_failed(&self) -> bool {
        self.loaded.get() == Some(&false)
    }

    pub fn status(&self) -> ScriptStatus {
        if self.is_ready() {
            ScriptStatus::Ready
        } else if self.has_failed() {
            ScriptStatus::Failed
        } else {
            ScriptStatus::Pending
        }
    }
}
