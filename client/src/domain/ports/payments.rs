//! Payment port trait
//!
//! The payment provider turns a card into a payment-method token on the
//! client; the server side exchanges that token for a charge.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body of `POST /payments/create-intent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in cents
    pub amount: u64,
    pub payment_method_id: String,
}

/// A confirmed (or pending) charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Port trait for charging the posting fee
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ApiError>;
}
