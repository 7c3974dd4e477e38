use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Where the current submission attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Validating,
    AwaitingOrder,
    AwaitingWidgetCompletion,
    AwaitingVerification,
    Succeeded,
    Failed,
}

impl AttemptState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// How an attempt that reached the widget ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed,
    /// The widget was dismissed without reporting a payment.
    Abandoned,
}

/// Publishes attempt state changes to any number of watchers.
#[derive(Debug, Clone)]
pub struct AttemptTracker {
    sender: Arc<watch::Sender<AttemptState>>,
}

impl Default for AttemptTracker {
    fn default() -> Self {
        let (sender, _) = watch::channel(AttemptState::Idle);
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl AttemptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> AttemptState {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AttemptState> {
        self.sender.subscribe()
    }

    pub fn transition(&self, next: AttemptState) {
        let previous = self.sender.send_replace(next);
        debug!(?previous, ?next, "attempt state changed");
    }

    /// Enters a terminal state, then returns to `Idle` for the next attempt.
    pub fn finish(&self, terminal: AttemptState) {
        debug_assert!(terminal.is_terminal());
        self.transition(terminal);
        self.transition(AttemptState::Idle);
    }
}
