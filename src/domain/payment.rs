use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signed confirmation handed to the completion callback by the checkout
/// widget.
///
/// The field names are fixed by the widget. Fields this crate does not know
/// about are kept in `extra` so the object reaches the verification endpoint
/// exactly as the widget produced it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentResult {
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(rename = "razorpay_order_id")]
    pub order_id: String,
    #[serde(rename = "razorpay_signature")]
    pub signature: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned by `POST /verify-payment`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub struct VerificationResponse {
    pub success: bool,
}
