use super::amount::MinorUnits;
use serde::{Deserialize, Serialize};

/// Body of `POST /create-order`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub struct CreateOrderRequest {
    pub amount: MinorUnits,
}

/// Backend-issued order, consumed by exactly one widget launch.
///
/// Deliberately not `Clone`: handing it to the launcher moves it.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderDescriptor {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}

/// Body returned by `POST /create-order`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderResponse {
    pub order: OrderDescriptor,
}
