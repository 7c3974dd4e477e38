use crate::domain::notification::Notification;
use crate::domain::order::{CreateOrderRequest, OrderDescriptor};
use crate::domain::payment::{PaymentResult, VerificationResponse};
use crate::domain::ports::{Notifier, OrderBackend, ScriptSource};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A script source whose outcome is fixed up front.
#[derive(Debug, Clone, Copy)]
pub struct StaticScriptSource {
    available: bool,
}

impl StaticScriptSource {
    pub fn available() -> Self {
        Self { available: true }
    }

    pub fn unavailable() -> Self {
        Self { available: false }
    }
}

#[async_trait]
impl ScriptSource for StaticScriptSource {
    async fn load(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(CheckoutError::ScriptLoad("script unavailable".to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationMode {
    /// Confirms payments for orders this backend issued.
    #[default]
    Honest,
    /// Answers `{ "success": false }` to everything.
    Reject,
    /// Fails every verification request at the transport level.
    Error,
}

/// A backend that lives in process memory.
///
/// Records every request it sees, which makes it the natural double for
/// tests and the offline sandbox.
#[derive(Debug)]
pub struct InMemoryOrderBackend {
    currency: String,
    fail_orders: bool,
    verification: VerificationMode,
    next_order: AtomicU64,
    issued: Mutex<HashSet<String>>,
    order_requests: Mutex<Vec<CreateOrderRequest>>,
    verified_payments: Mutex<Vec<PaymentResult>>,
}

impl Default for InMemoryOrderBackend {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            fail_orders: false,
            verification: VerificationMode::default(),
            next_order: AtomicU64::new(1),
            issued: Mutex::new(HashSet::new()),
            order_requests: Mutex::new(Vec::new()),
            verified_payments: Mutex::new(Vec::new()),
        }
    }
}

impl InMemoryOrderBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every order-creation request fail.
    pub fn failing_orders(mut self) -> Self {
        self.fail_orders = true;
        self
    }

    pub fn with_verification(mut self, mode: VerificationMode) -> Self {
        self.verification = mode;
        self
    }

    pub fn order_requests(&self) -> Vec<CreateOrderRequest> {
        lock(&self.order_requests).clone()
    }

    pub fn verified_payments(&self) -> Vec<PaymentResult> {
        lock(&self.verified_payments).clone()
    }
}

#[async_trait]
impl OrderBackend for InMemoryOrderBackend {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDescriptor> {
        lock(&self.order_requests).push(request);

        if self.fail_orders {
            return Err(CheckoutError::OrderRequest(
                "order service unavailable".to_string(),
            ));
        }

        let id = format!(
            "order_{:014}",
            self.next_order.fetch_add(1, Ordering::Relaxed)
        );
        lock(&self.issued).insert(id.clone());

        Ok(OrderDescriptor {
            id,
            amount: request.amount.value(),
            currency: self.currency.clone(),
        })
    }

    async fn verify_payment(&self, result: &PaymentResult) -> Result<VerificationResponse> {
        lock(&self.verified_payments).push(result.clone());

        let success = match self.verification {
            VerificationMode::Honest => {
                !result.signature.is_empty() && lock(&self.issued).contains(&result.order_id)
            }
            VerificationMode::Reject => false,
            VerificationMode::Error => {
                return Err(CheckoutError::Verification(
                    "connection reset".to_string(),
                ));
            }
        };

        Ok(VerificationResponse { success })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierEvent {
    Shown(Notification),
    Dismissed,
}

/// Keeps every notification instead of displaying it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotifierEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotifierEvent> {
        lock(&self.events).clone()
    }

    /// Shown notifications in order, ignoring dismissals.
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                NotifierEvent::Shown(n) => Some(n.clone()),
                NotifierEvent::Dismissed => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.events).push(NotifierEvent::Shown(notification));
    }

    fn dismiss(&self) {
        lock(&self.events).push(NotifierEvent::Dismissed);
    }
}
