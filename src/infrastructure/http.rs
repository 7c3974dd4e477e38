use crate::config::CheckoutConfig;
use crate::domain::order::{CreateOrderRequest, CreateOrderResponse, OrderDescriptor};
use crate::domain::payment::{PaymentResult, VerificationResponse};
use crate::domain::ports::{OrderBackend, ScriptSource};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// Fetches the checkout library over HTTP.
///
/// A native process cannot execute the browser bundle, so a successful,
/// non-empty download counts as loaded.
#[derive(Debug, Clone)]
pub struct HttpScriptSource {
    client: Client,
    url: Url,
}

impl HttpScriptSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ScriptSource for HttpScriptSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn load(&self) -> Result<()> {
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CheckoutError::ScriptLoad(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| CheckoutError::ScriptLoad(e.to_string()))?;

        if body.is_empty() {
            return Err(CheckoutError::ScriptLoad("empty script body".to_string()));
        }

        debug!(bytes = body.len(), "checkout script fetched");
        Ok(())
    }
}

/// JSON client for the backend's `create-order` and `verify-payment`
/// endpoints.
#[derive(Debug, Clone)]
pub struct HttpOrderBackend {
    client: Client,
    create_order_url: Url,
    verify_payment_url: Url,
}

impl HttpOrderBackend {
    pub fn new(client: Client, config: &CheckoutConfig) -> Result<Self> {
        Ok(Self {
            client,
            create_order_url: config.endpoint("create-order")?,
            verify_payment_url: config.endpoint("verify-payment")?,
        })
    }
}

#[async_trait]
impl OrderBackend for HttpOrderBackend {
    #[instrument(skip(self), fields(amount = request.amount.value()))]
    async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDescriptor> {
        let response: CreateOrderResponse = self
            .client
            .post(self.create_order_url.clone())
            .json(&request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CheckoutError::OrderRequest(e.to_string()))?
            .json()
            .await
            .map_err(|e| CheckoutError::OrderRequest(format!("malformed order response: {e}")))?;

        Ok(response.order)
    }

    #[instrument(skip_all, fields(order_id = %result.order_id))]
    async fn verify_payment(&self, result: &PaymentResult) -> Result<VerificationResponse> {
        self.client
            .post(self.verify_payment_url.clone())
            .json(result)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| CheckoutError::Verification(e.to_string()))?
            .json()
            .await
            .map_err(|e| CheckoutError::Verification(format!("malformed verification response: {e}")))
    }
}
