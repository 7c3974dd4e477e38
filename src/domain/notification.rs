use serde::Serialize;
use std::fmt;

pub const SCRIPT_LOAD_FAILED: &str = "Failed to load Razorpay script";
pub const SCRIPT_NOT_READY: &str = "Razorpay SDK not loaded. Please try again.";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount.";
pub const PROCESSING: &str = "Processing payment...";
pub const ORDER_FAILED: &str = "Error processing payment.";
pub const PAYMENT_SUCCEEDED: &str = "Payment successful!";
pub const VERIFICATION_FAILED: &str = "Payment verification failed.";

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

/// A transient, toast-style message shown to the user.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Loading,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NotificationKind::Loading => "…",
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✘",
        };
        write!(f, "{tag} {}", self.message)
    }
}
