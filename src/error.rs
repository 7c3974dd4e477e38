use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Checkout script failed to load: {0}")]
    ScriptLoad(String),
    #[error("Checkout script is not loaded")]
    ScriptNotReady,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("A payment request is already in flight")]
    SubmissionInFlight,
    #[error("Order request failed: {0}")]
    OrderRequest(String),
    #[error("Checkout widget error: {0}")]
    Widget(String),
    #[error("Payment verification failed: {0}")]
    Verification(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
