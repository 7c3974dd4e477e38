use super::loading::LoadingFlag;
use super::order_initiator::OrderInitiator;
use super::script_loader::{ScriptLoader, ScriptStatus};
use super::state::{AttemptOutcome, AttemptState, AttemptTracker};
use super::widget_launcher::WidgetLauncher;
use crate::config::CheckoutConfig;
use crate::domain::amount::MinorUnits;
use crate::domain::ports::{CheckoutWidgetFactoryRef, NotifierRef, OrderBackendRef, ScriptSourceRef};
use crate::error::{CheckoutError, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info_span, warn, Instrument};

/// The collaborators the workflow is wired to.
#[derive(Clone)]
pub struct Ports {
    pub script_source: ScriptSourceRef,
    pub backend: OrderBackendRef,
    pub widget_factory: CheckoutWidgetFactoryRef,
    pub notifier: NotifierRef,
}

/// The pay button: loads the checkout script, turns an entered amount into
/// an order, opens the checkout widget for it, and has the backend verify
/// whatever payment the widget reports.
pub struct PaymentWorkflow {
    currency: String,
    script_loader: ScriptLoader,
    initiator: OrderInitiator,
    launcher: WidgetLauncher,
    backend: OrderBackendRef,
    notifier: NotifierRef,
    loading: LoadingFlag,
    tracker: AttemptTracker,
}

/// A submission whose widget is open.
///
/// The loading flag is already lowered at this point; verification runs
/// in the background.
#[derive(Debug)]
pub struct Submission {
    order_id: String,
    amount: MinorUnits,
    settlement: JoinHandle<AttemptOutcome>,
}

impl Submission {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    /// Waits for the widget and any verification to finish.
    pub async fn outcome(self) -> AttemptOutcome {
        match self.settlement.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(order_id = %self.order_id, error = %e, "settlement task failed");
                AttemptOutcome::Failed
            }
        }
    }
}

impl PaymentWorkflow {
    pub fn new(config: CheckoutConfig, ports: Ports) -> Self {
        let loading = LoadingFlag::new();
        Self {
            currency: config.currency.clone(),
            script_loader: ScriptLoader::new(ports.script_source, ports.notifier.clone()),
            initiator: OrderInitiator::new(
                ports.backend.clone(),
                ports.notifier.clone(),
                loading.clone(),
            ),
            launcher: WidgetLauncher::new(ports.widget_factory, ports.notifier.clone(), config),
            backend: ports.backend,
            notifier: ports.notifier,
            loading,
            tracker: AttemptTracker::new(),
        }
    }

    /// Loads the checkout script. Only the first call does any work.
    pub async fn mount(&self) -> bool {
        self.script_loader.load().await
    }

    pub fn is_ready(&self) -> bool {
        self.script_loader.is_ready()
    }

    /// Tells a script that is still loading apart from one that failed.
    pub fn script_status(&self) -> ScriptStatus {
        self.script_loader.status()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Whether the pay button is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_ready() && !self.is_loading()
    }

    pub fn button_label(&self, raw_amount: &str) -> String {
        if self.is_loading() {
            return "Processing...".to_string();
        }
        let shown = match raw_amount.trim() {
            "" => "0",
            amount => amount,
        };
        format!("Pay {}{shown}", currency_symbol(&self.currency))
    }

    pub fn state(&self) -> AttemptState {
        self.tracker.current()
    }

    pub fn watch_state(&self) -> watch::Receiver<AttemptState> {
        self.tracker.subscribe()
    }

    /// Runs one payment attempt up to the point where the widget is open.
    ///
    /// Rejections and failures have already been notified when this returns
    /// an error. Must be called within a Tokio runtime.
    pub async fn submit(&self, raw_amount: &str) -> Result<Submission> {
        if self.is_loading() {
            warn!("submission ignored: a request is already in flight");
            return Err(CheckoutError::SubmissionInFlight);
        }

        self.tracker.transition(AttemptState::Validating);
        let amount = self
            .initiator
            .validate(self.script_status(), raw_amount)
            .inspect_err(|_| self.tracker.finish(AttemptState::Failed))?;

        let span = info_span!("payment_attempt", amount = amount.value());

        self.tracker.transition(AttemptState::AwaitingOrder);
        let placed = self
            .initiator
            .place(amount)
            .instrument(span.clone())
            .await
            .inspect_err(|_| self.tracker.finish(AttemptState::Failed))?;

        let (order, in_flight) = placed.into_parts();
        let launched = span.in_scope(|| self.launcher.launch(order));
        drop(in_flight);
        let pending = launched.inspect_err(|_| self.tracker.finish(AttemptState::Failed))?;

        self.tracker.transition(AttemptState::AwaitingWidgetCompletion);
        let order_id = pending.order_id().to_string();
        let settlement = tokio::spawn(
            pending
                .settle(
                    self.backend.clone(),
                    self.notifier.clone(),
                    self.tracker.clone(),
                )
                .instrument(span),
        );

        Ok(Submission {
            order_id,
            amount,
            settlement,
        })
    }
}

fn currency_symbol(code: &str) -> String {
    match code {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{other} "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{
        InMemoryOrderBackend, RecordingNotifier, StaticScriptSource,
    };
    use crate::infrastructure::terminal::TerminalWidgetFactory;
    use std::io::Cursor;
    use std::sync::Arc;

    fn workflow(script: StaticScriptSource) -> PaymentWorkflow {
        PaymentWorkflow::new(
            CheckoutConfig::default(),
            Ports {
                script_source: Arc::new(script),
                backend: Arc::new(InMemoryOrderBackend::new()),
                widget_factory: Arc::new(TerminalWidgetFactory::new(Cursor::new(Vec::new()))),
                notifier: Arc::new(RecordingNotifier::new()),
            },
        )
    }

    #[tokio::test]
    async fn test_button_disabled_until_mounted() {
        let workflow = workflow(StaticScriptSource::available());
        assert!(!workflow.can_submit());
        assert_eq!(workflow.script_status(), ScriptStatus::Pending);
        assert!(workflow.mount().await);
        assert!(workflow.can_submit());
        assert_eq!(workflow.script_status(), ScriptStatus::Ready);
    }

    #[tokio::test]
    async fn test_button_stays_disabled_after_load_failure() {
        let workflow = workflow(StaticScriptSource::unavailable());
        assert!(!workflow.mount().await);
        assert!(!workflow.can_submit());
        assert_eq!(workflow.script_status(), ScriptStatus::Failed);
    }

    #[test]
    fn test_button_label() {
        let workflow = workflow(StaticScriptSource::available());
        assert_eq!(workflow.button_label(""), "Pay ₹0");
        assert_eq!(workflow.button_label("250"), "Pay ₹250");

        let _busy = workflow.loading.try_begin().unwrap();
        assert_eq!(workflow.button_label("250"), "Processing...");
    }

    #[test]
    fn test_currency_symbol_fallback() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("JPY"), "JPY ");
    }

    #[tokio::test]
    async fn test_submit_abandoned_widget_returns_to_idle() {
        let workflow = workflow(StaticScriptSource::available());
        workflow.mount().await;

        let submission = workflow.submit("10").await.unwrap();
        assert_eq!(submission.amount().value(), 1000);
        assert!(!workflow.is_loading());

        assert_eq!(submission.outcome().await, AttemptOutcome::Abandoned);
        assert_eq!(workflow.state(), AttemptState::Idle);
    }
}
