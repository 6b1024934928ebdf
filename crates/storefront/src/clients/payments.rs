//! Payment gateway API client.
//!
//! Creates payment orders for checkout. The storefront sends the cart
//! total in the smallest currency unit; the returned order id, amount,
//! and currency are handed to the third-party checkout widget, which runs
//! entirely outside this codebase.

use gallery_core::CurrencyCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::PaymentConfig;

/// Errors that can occur when creating a payment order.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned an error response.
    #[error("Payment API error: {status} - {detail}")]
    Api { status: u16, detail: String },

    /// Order amount must be a positive number of minor units.
    #[error("Invalid order amount: {0}")]
    InvalidAmount(i64),
}

/// A payment order created by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    /// Gateway order identifier (opaque string).
    pub id: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
}

/// Client for the payment order API.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
}

impl PaymentClient {
    /// Create a new payment client.
    #[must_use]
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        }
    }

    /// The gateway key id, safe to hand to the checkout widget.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a payment order for `amount` minor units.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidAmount` for non-positive amounts
    /// (checked locally, never sent to the gateway), `PaymentError::Api`
    /// when the gateway rejects the order, or `PaymentError::Http` on
    /// transport failure.
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        amount: i64,
        currency: CurrencyCode,
    ) -> Result<PaymentOrder, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount(amount));
        }

        let url = format!("{}/payment/create-order", self.base_url);
        let body = CreateOrderBody {
            amount,
            currency: currency.code(),
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_order_deserializes() {
        let json = r#"{"id": "order_MkWvx2Qb3c", "amount": 150000, "currency": "INR", "status": "created"}"#;
        let order: PaymentOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "order_MkWvx2Qb3c");
        assert_eq!(order.amount, 150_000);
        assert_eq!(order.currency, "INR");
    }

    #[test]
    fn test_create_order_body_serializes() {
        let body = CreateOrderBody {
            amount: 50_000,
            currency: "INR",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], 50_000);
        assert_eq!(json["currency"], "INR");
    }

    #[test]
    fn test_invalid_amount_display() {
        let err = PaymentError::InvalidAmount(0);
        assert_eq!(err.to_string(), "Invalid order amount: 0");
    }
}
