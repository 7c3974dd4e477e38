use super::state::{AttemptOutcome, AttemptState, AttemptTracker};
use crate::config::CheckoutConfig;
use crate::domain::notification::{
    Notification, ORDER_FAILED, PAYMENT_SUCCEEDED, VERIFICATION_FAILED,
};
use crate::domain::order::OrderDescriptor;
use crate::domain::ports::{CheckoutWidgetFactoryRef, NotifierRef, OrderBackendRef};
use crate::domain::widget::{CheckoutOptions, Completion, completion_channel};
use crate::error::Result;
use tracing::{debug, error, info, warn};

/// Configures the checkout widget for an order and displays it.
pub struct WidgetLauncher {
    factory: CheckoutWidgetFactoryRef,
    notifier: NotifierRef,
    config: CheckoutConfig,
}

impl WidgetLauncher {
    pub fn new(factory: CheckoutWidgetFactoryRef, notifier: NotifierRef, config: CheckoutConfig) -> Self {
        Self {
            factory,
            notifier,
            config,
        }
    }

    /// The amount and currency always come from the order so the widget
    /// charges exactly what the backend booked.
    pub fn options_for(&self, order: &OrderDescriptor) -> CheckoutOptions {
        if order.currency != self.config.currency {
            warn!(
                order_id = %order.id,
                order_currency = %order.currency,
                configured_currency = %self.config.currency,
                "order currency differs from configured currency"
            );
        }

        CheckoutOptions {
            key: self.config.key_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: self.config.merchant_name.clone(),
            description: self.config.description.clone(),
            order_id: order.id.clone(),
            prefill: self.config.prefill.clone(),
            theme: self.config.theme.clone(),
        }
    }

    /// Opens the widget for `order`. The order is consumed, so it can back
    /// at most one launch.
    pub fn launch(&self, order: OrderDescriptor) -> Result<PendingPayment> {
        let options = self.options_for(&order);
        let (on_complete, completion) = completion_channel();

        let opened = self
            .factory
            .create(options, on_complete)
            .and_then(|mut widget| widget.open());

        if let Err(e) = opened {
            error!(order_id = %order.id, error = %e, "checkout widget failed to open");
            self.notifier.dismiss();
            self.notifier.notify(Notification::error(ORDER_FAILED));
            return Err(e);
        }

        info!(order_id = %order.id, "checkout widget opened");
        Ok(PendingPayment {
            order_id: order.id,
            completion,
        })
    }
}

/// A launched widget whose outcome has not been reported yet.
#[derive(Debug)]
pub struct PendingPayment {
    order_id: String,
    completion: Completion,
}

impl PendingPayment {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Waits for the widget and, if it reports a payment, has the backend
    /// verify it.
    ///
    /// There is no timeout: if the widget neither reports nor releases its
    /// callback this never returns.
    pub async fn settle(
        self,
        backend: OrderBackendRef,
        notifier: NotifierRef,
        tracker: AttemptTracker,
    ) -> AttemptOutcome {
        let Some(result) = self.completion.wait().await else {
            info!(order_id = %self.order_id, "checkout widget dismissed without payment");
            notifier.dismiss();
            tracker.transition(AttemptState::Idle);
            return AttemptOutcome::Abandoned;
        };

        tracker.transition(AttemptState::AwaitingVerification);
        debug!(
            order_id = %result.order_id,
            payment_id = %result.payment_id,
            "verifying payment"
        );

        let verified = match backend.verify_payment(&result).await {
            Ok(response) => response.success,
            Err(e) => {
                error!(order_id = %self.order_id, error = %e, "payment verification error");
                false
            }
        };

        notifier.dismiss();
        if verified {
            info!(order_id = %self.order_id, "payment verified");
            notifier.notify(Notification::success(PAYMENT_SUCCEEDED));
            tracker.finish(AttemptState::Succeeded);
            AttemptOutcome::Succeeded
        } else {
            warn!(order_id = %self.order_id, "payment not verified");
            notifier.notify(Notification::error(VERIFICATION_FAILED));
            tracker.finish(AttemptState::Failed);
            AttemptOutcome::Failed
        }
    }
}
