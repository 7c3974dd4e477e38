use super::payment::PaymentResult;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl Default for Prefill {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "johndoe@example.com".to_string(),
            contact: "9999999999".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Theme {
    pub color: String,
}

/// Configuration handed to the checkout widget constructor.
///
/// The completion callback travels separately as a [`CompletionCallback`],
/// so this struct serializes to the plain options object the widget expects.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

/// Single-shot completion callback given to the widget.
///
/// Firing consumes the callback, so a launch resolves at most once.
/// Dropping it without firing means the user abandoned the widget.
#[derive(Debug)]
pub struct CompletionCallback {
    sender: oneshot::Sender<PaymentResult>,
}

impl CompletionCallback {
    /// Reports the payment result. Returns `false` if nobody is waiting on
    /// the launch any more.
    pub fn complete(self, result: PaymentResult) -> bool {
        self.sender.send(result).is_ok()
    }
}

/// Receiving half of a [`CompletionCallback`].
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<PaymentResult>,
}

impl Completion {
    /// Waits for the widget. `None` when the callback was dropped unfired.
    /// Never resolves if the widget keeps the callback forever.
    pub async fn wait(self) -> Option<PaymentResult> {
        self.receiver.await.ok()
    }
}

pub fn completion_channel() -> (CompletionCallback, Completion) {
    let (sender, receiver) = oneshot::channel();
    (CompletionCallback { sender }, Completion { receiver })
}
