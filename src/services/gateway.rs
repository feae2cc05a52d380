use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::utils::error::AppError;

const RAZORPAY_ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// Order as created at the payment gateway. Amounts are in minor
/// currency units (paise).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

/// Seam over the payment gateway's order-creation API, so the payment
/// service can be exercised without network access.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, amount: i64, currency: &str, receipt: &str)
        -> Result<GatewayOrder, AppError>;
}

#[derive(Debug, Deserialize)]
struct RazorpayOrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

/// Thin HTTP wrapper over Razorpay's orders endpoint, basic-auth with
/// the key pair.
pub struct RazorpayGateway {
    client: reqwest::Client,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id,
            key_secret,
        }
    }
}

#[async_trait]
impl OrderGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, AppError> {
        let response = self
            .client
            .post(RAZORPAY_ORDERS_URL)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gateway unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Gateway rejected order creation: {}",
                response.status()
            )));
        }

        let order: RazorpayOrderResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid gateway response: {}", e)))?;

        Ok(GatewayOrder {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Deterministic in-memory gateway for service tests.
    pub struct FakeGateway {
        counter: AtomicU64,
    }

    impl FakeGateway {
        pub fn new() -> Self {
            Self {
                counter: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl OrderGateway for FakeGateway {
        async fn create_order(
            &self,
            amount: i64,
            currency: &str,
            _receipt: &str,
        ) -> Result<GatewayOrder, AppError> {
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(GatewayOrder {
                order_id: format!("order_fake{:08}", n),
                amount,
                currency: currency.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_fake_gateway_issues_unique_order_ids() {
        let gateway = FakeGateway::new();
        let a = gateway.create_order(5000, "INR", "r1").await.unwrap();
        let b = gateway.create_order(5000, "INR", "r2").await.unwrap();
        assert_ne!(a.order_id, b.order_id);
        assert_eq!(a.amount, 5000);
    }
}
