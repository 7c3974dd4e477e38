#![allow(dead_code)]

use paybutton::application::workflow::{PaymentWorkflow, Ports};
use paybutton::config::CheckoutConfig;
use async_trait::async_trait;
use paybutton::domain::order::{CreateOrderRequest, OrderDescriptor};
use paybutton::domain::payment::{PaymentResult, VerificationResponse};
use paybutton::domain::ports::{CheckoutWidget, CheckoutWidgetFactory, OrderBackend};
use paybutton::domain::widget::{CheckoutOptions, CompletionCallback};
use paybutton::error::{CheckoutError, Result};
use paybutton::infrastructure::in_memory::{
    InMemoryOrderBackend, RecordingNotifier, StaticScriptSource,
};
use serde_json::Map;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A widget double that keeps every completion callback so a test can
/// decide when, and whether, the payment is reported.
#[derive(Default)]
pub struct ManualWidgetFactory {
    launches: Mutex<Vec<Launch>>,
    broken: bool,
}

struct Launch {
    options: CheckoutOptions,
    callback: Option<CompletionCallback>,
}

struct ManualWidget;

impl CheckoutWidget for ManualWidget {
    fn open(&mut self) -> Result<()> {
        Ok(())
    }
}

impl CheckoutWidgetFactory for ManualWidgetFactory {
    fn create(
        &self,
        options: CheckoutOptions,
        on_complete: CompletionCallback,
    ) -> Result<Box<dyn CheckoutWidget>> {
        if self.broken {
            return Err(CheckoutError::Widget("checkout constructor missing".to_string()));
        }
        self.launches.lock().unwrap().push(Launch {
            options,
            callback: Some(on_complete),
        });
        Ok(Box::new(ManualWidget))
    }
}

impl ManualWidgetFactory {
    /// A factory whose widgets can never be constructed.
    pub fn failing() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn launch_count(&self) -> usize {
        self.launches.lock().unwrap().len()
    }

    pub fn options(&self, index: usize) -> CheckoutOptions {
        self.launches.lock().unwrap()[index].options.clone()
    }

    /// Reports a payment for launch `index` with the given signature.
    pub fn pay(&self, index: usize, signature: &str) -> bool {
        let mut launches = self.launches.lock().unwrap();
        let launch = &mut launches[index];
        let callback = launch.callback.take().expect("launch already settled");
        callback.complete(PaymentResult {
            payment_id: format!("pay_{index}"),
            order_id: launch.options.order_id.clone(),
            signature: signature.to_string(),
            extra: Map::new(),
        })
    }

    /// Closes launch `index` without paying.
    pub fn dismiss(&self, index: usize) {
        self.launches.lock().unwrap()[index].callback.take();
    }
}

pub struct Harness {
    pub workflow: PaymentWorkflow,
    pub backend: Arc<InMemoryOrderBackend>,
    pub widgets: Arc<ManualWidgetFactory>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(script: StaticScriptSource, backend: InMemoryOrderBackend) -> Harness {
    harness_with_widgets(script, backend, ManualWidgetFactory::default())
}

pub fn harness_with_widgets(
    script: StaticScriptSource,
    backend: InMemoryOrderBackend,
    widgets: ManualWidgetFactory,
) -> Harness {
    let backend = Arc::new(backend);
    build(script, backend.clone(), backend, Arc::new(widgets))
}

/// A harness whose order requests wait inside the backend until released.
pub fn parked_harness(script: StaticScriptSource) -> (Harness, Arc<ParkedOrderBackend>) {
    let parked = Arc::new(ParkedOrderBackend::new());
    let harness = build(
        script,
        parked.clone(),
        parked.inner.clone(),
        Arc::new(ManualWidgetFactory::default()),
    );
    (harness, parked)
}

fn build(
    script: StaticScriptSource,
    port: Arc<dyn OrderBackend>,
    backend: Arc<InMemoryOrderBackend>,
    widgets: Arc<ManualWidgetFactory>,
) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());

    let workflow = PaymentWorkflow::new(
        CheckoutConfig::default(),
        Ports {
            script_source: Arc::new(script),
            backend: port,
            widget_factory: widgets.clone(),
            notifier: notifier.clone(),
        },
    );

    Harness {
        workflow,
        backend,
        widgets,
        notifier,
    }
}

/// An order backend that holds every `create_order` call until released.
///
/// `entered` fires once a call is parked; `release` lets one call through
/// to the in-memory backend.
pub struct ParkedOrderBackend {
    pub inner: Arc<InMemoryOrderBackend>,
    pub entered: Notify,
    pub release: Notify,
}

impl ParkedOrderBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemoryOrderBackend::new()),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl OrderBackend for ParkedOrderBackend {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDescriptor> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.create_order(request).await
    }

    async fn verify_payment(&self, result: &PaymentResult) -> Result<VerificationResponse> {
        self.inner.verify_payment(result).await
    }
}
