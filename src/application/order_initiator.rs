use super::loading::{LoadingFlag, LoadingGuard};
use super::script_loader::ScriptStatus;
use crate::domain::amount::MinorUnits;
use crate::domain::notification::{
    INVALID_AMOUNT, ORDER_FAILED, PROCESSING, Notification, SCRIPT_NOT_READY,
};
use crate::domain::order::{CreateOrderRequest, OrderDescriptor};
use crate::domain::ports::{NotifierRef, OrderBackendRef};
use crate::error::{CheckoutError, Result};
use tracing::{error, info, warn};

/// An order the backend accepted, still holding the in-flight flag.
///
/// The flag drops with this value, or with the guard taken from
/// [`PlacedOrder::into_parts`].
#[derive(Debug)]
pub struct PlacedOrder {
    order: OrderDescriptor,
    in_flight: LoadingGuard,
}

impl PlacedOrder {
    pub fn order(&self) -> &OrderDescriptor {
        &self.order
    }

    pub fn into_parts(self) -> (OrderDescriptor, LoadingGuard) {
        (self.order, self.in_flight)
    }
}

/// Validates the entered amount and asks the backend for an order.
pub struct OrderInitiator {
    backend: OrderBackendRef,
    notifier: NotifierRef,
    loading: LoadingFlag,
}

impl OrderInitiator {
    pub fn new(backend: OrderBackendRef, notifier: NotifierRef, loading: LoadingFlag) -> Self {
        Self {
            backend,
            notifier,
            loading,
        }
    }

    /// Checks that a submission may proceed. No network call is made either
    /// way.
    pub fn validate(&self, script: ScriptStatus, raw: &str) -> Result<MinorUnits> {
        match script {
            ScriptStatus::Ready => {}
            ScriptStatus::Pending => {
                warn!("submission rejected: checkout script still loading");
                self.notifier.notify(Notification::error(SCRIPT_NOT_READY));
                return Err(CheckoutError::ScriptNotReady);
            }
            ScriptStatus::Failed => {
                warn!("submission rejected: checkout script failed to load this session");
                self.notifier.notify(Notification::error(SCRIPT_NOT_READY));
                return Err(CheckoutError::ScriptNotReady);
            }
        }

        MinorUnits::parse_major(raw).inspect_err(|e| {
            warn!(input = raw, error = %e, "submission rejected: invalid amount");
            self.notifier.notify(Notification::error(INVALID_AMOUNT));
        })
    }

    /// Sends a single order-creation request for `amount`.
    ///
    /// The loading flag is raised for the duration and handed back inside
    /// the [`PlacedOrder`] on success; on failure it is already lowered.
    pub async fn place(&self, amount: MinorUnits) -> Result<PlacedOrder> {
        let in_flight = self.loading.try_begin().ok_or_else(|| {
            warn!("submission rejected: a request is already in flight");
            CheckoutError::SubmissionInFlight
        })?;

        self.notifier.notify(Notification::loading(PROCESSING));
        info!(amount = amount.value(), major = %amount.to_major(), "creating order");

        match self.backend.create_order(CreateOrderRequest { amount }).await {
            Ok(order) => {
                info!(order_id = %order.id, amount = order.amount, currency = %order.currency, "order created");
                Ok(PlacedOrder { order, in_flight })
            }
            Err(e) => {
                error!(error = %e, "order creation failed");
                self.notifier.dismiss();
                self.notifier.notify(Notification::error(ORDER_FAILED));
                Err(e)
            }
        }
    }
}
