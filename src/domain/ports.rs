use super::notification::Notification;
use super::order::{CreateOrderRequest, OrderDescriptor};
use super::payment::{PaymentResult, VerificationResponse};
use super::widget::{CheckoutOptions, CompletionCallback};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches and executes the external checkout library.
#[async_trait]
pub trait ScriptSource: Send + Sync {
    async fn load(&self) -> Result<()>;
}

/// The backend collaborator that creates orders and verifies payments.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDescriptor>;
    async fn verify_payment(&self, result: &PaymentResult) -> Result<VerificationResponse>;
}

/// A constructed checkout widget, ready to be displayed.
pub trait CheckoutWidget: Send {
    fn open(&mut self) -> Result<()>;
}

/// Stand-in for the widget constructor the checkout script injects.
pub trait CheckoutWidgetFactory: Send + Sync {
    fn create(
        &self,
        options: CheckoutOptions,
        on_complete: CompletionCallback,
    ) -> Result<Box<dyn CheckoutWidget>>;
}

/// The single user-facing notification channel.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
    /// Clears any toast still on screen, such as the loading indicator.
    fn dismiss(&self);
}

pub type ScriptSourceRef = Arc<dyn ScriptSource>;
pub type OrderBackendRef = Arc<dyn OrderBackend>;
pub type CheckoutWidgetFactoryRef = Arc<dyn CheckoutWidgetFactory>;
pub type NotifierRef = Arc<dyn Notifier>;
