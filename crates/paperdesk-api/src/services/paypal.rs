//! PayPal Checkout client
//!
//! Orders API v2 with client-credentials OAuth. Amounts cross this boundary
//! as decimal strings in major units ("8.97"); everywhere else the
//! application holds integer cents.

use paperdesk_core::models::cents_to_decimal;
use paperdesk_core::{AppError, Config};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Clone)]
pub struct PayPalClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

/// A PayPal order created for checkout approval.
#[derive(Debug, Clone)]
pub struct CreatedPayPalOrder {
    pub paypal_order_id: String,
    pub approve_url: Option<String>,
}

/// A captured PayPal payment.
#[derive(Debug, Clone)]
pub struct CapturedPayment {
    pub capture_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl PayPalClient {
    /// Build the client from config. Returns `None` when credentials are absent.
    pub fn from_config(config: &Config) -> Option<Self> {
        let client_id = config.paypal_client_id()?.to_string();
        let client_secret = config.paypal_client_secret()?.to_string();
        tracing::info!(base_url = %config.paypal_base_url(), "PayPal client initialized");
        Some(Self {
            http: reqwest::Client::new(),
            base_url: config.paypal_base_url().to_string(),
            client_id,
            client_secret,
        })
    }

    async fn access_token(&self) -> Result<String, AppError> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PaymentProvider(format!(
                "Token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Invalid token response: {}", e)))?;
        Ok(token.access_token)
    }

    /// Create a PayPal order for the given amount in cents.
    #[tracing::instrument(skip(self), fields(order_id = %order_id))]
    pub async fn create_order(
        &self,
        order_id: Uuid,
        amount_cents: i64,
        description: &str,
    ) -> Result<CreatedPayPalOrder, AppError> {
        let token = self.access_token().await?;

        let body = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": order_id.to_string(),
                "description": description,
                "amount": {
                    "currency_code": "USD",
                    "value": cents_to_decimal(amount_cents).to_string(),
                }
            }]
        });

        let response = self
            .http
            .post(format!("{}/v2/checkout/orders", self.base_url))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Create order failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PaymentProvider(format!(
                "Create order returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Invalid create response: {}", e)))?;

        let paypal_order_id = payload
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::PaymentProvider("Create response missing order id".to_string())
            })?
            .to_string();

        let approve_url = payload
            .get("links")
            .and_then(|v| v.as_array())
            .and_then(|links| {
                links.iter().find(|link| {
                    link.get("rel").and_then(|r| r.as_str()) == Some("approve")
                })
            })
            .and_then(|link| link.get("href"))
            .and_then(|v| v.as_str())
            .map(String::from);

        tracing::info!(paypal_order_id = %paypal_order_id, "PayPal order created");
        Ok(CreatedPayPalOrder {
            paypal_order_id,
            approve_url,
        })
    }

    /// Capture an approved PayPal order. Rejects any final status other
    /// than COMPLETED.
    #[tracing::instrument(skip(self))]
    pub async fn capture_order(&self, paypal_order_id: &str) -> Result<CapturedPayment, AppError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{}/capture",
                self.base_url, paypal_order_id
            ))
            .bearer_auth(&token)
            .header(http::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Capture failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::PaymentProvider(format!(
                "Capture returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Invalid capture response: {}", e)))?;

        let status = payload
            .get("status")
            .and_then(|v| v.as_str())
            .unwrap_or("UNKNOWN");
        if status != "COMPLETED" {
            return Err(AppError::PaymentRejected(format!(
                "Payment was not completed (status: {})",
                status
            )));
        }

        let capture_id = payload
            .pointer("/purchase_units/0/payments/captures/0/id")
            .and_then(|v| v.as_str())
            .unwrap_or(paypal_order_id)
            .to_string();

        tracing::info!(capture_id = %capture_id, "PayPal payment captured");
        Ok(CapturedPayment { capture_id })
    }
}
