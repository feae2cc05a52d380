use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::participation::ParticipantRole;
use crate::models::pass::EventPass;
use crate::models::payment::VerifyPaymentRequest;
use crate::models::user::User;
use crate::repositories::{EventRepository, ParticipationRepository, PassRepository, PaymentRepository};
use crate::services::gateway::OrderGateway;
use crate::services::signature::verify_payment_signature;
use crate::utils::error::AppError;

const ORDER_CURRENCY: &str = "INR";

/// Order payload returned to the client, including the publishable key
/// it needs to open the checkout widget.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// Paid-event admission: gateway order creation, signature-gated
/// verification, pass issuance.
#[derive(Clone)]
pub struct PaymentService {
    events: EventRepository,
    payments: PaymentRepository,
    participations: ParticipationRepository,
    passes: PassRepository,
    gateway: Arc<dyn OrderGateway>,
    key_id: String,
    key_secret: String,
}

impl PaymentService {
    pub fn new(
        events: EventRepository,
        payments: PaymentRepository,
        participations: ParticipationRepository,
        passes: PassRepository,
        gateway: Arc<dyn OrderGateway>,
        key_id: String,
        key_secret: String,
    ) -> Self {
        Self {
            events,
            payments,
            participations,
            passes,
            gateway,
            key_id,
            key_secret,
        }
    }

    /// Create a gateway order for a paid event and record the attempt.
    /// No participation exists until the payment verifies.
    pub async fn create_order(
        &self,
        event_id: Uuid,
        user: &User,
    ) -> Result<OrderResponse, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if !event.is_paid {
            return Err(AppError::ValidationError(
                "This event does not require payment".to_string(),
            ));
        }

        let amount = to_minor_units(event.price).ok_or_else(|| {
            AppError::InternalServerError("Event price is not representable".to_string())
        })?;

        let receipt = format!("evt-{}", event_id.simple());
        let order = self
            .gateway
            .create_order(amount, ORDER_CURRENCY, &receipt)
            .await?;

        self.payments
            .insert_created(event_id, user.id, &order.order_id, event.price)
            .await?;

        info!(event_id = %event_id, order_id = %order.order_id, "Payment order created");

        Ok(OrderResponse {
            order_id: order.order_id,
            amount: order.amount,
            currency: order.currency,
            key_id: self.key_id.clone(),
        })
    }

    /// Verify the gateway signature and, on success, admit the user:
    /// payment flips created -> paid, then the participation and pass
    /// are written and the event's counters updated. The paid flip
    /// deliberately comes first; a crash in between leaves a paid
    /// payment without a pass, which is surfaced by support tooling
    /// rather than compensated here.
    pub async fn verify_payment(
        &self,
        request: VerifyPaymentRequest,
        user: &User,
    ) -> Result<EventPass, AppError> {
        if !verify_payment_signature(
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
            &self.key_secret,
        ) {
            return Err(AppError::ValidationError(
                "Invalid payment signature".to_string(),
            ));
        }

        let existing = self
            .payments
            .find_by_order_id(&request.razorpay_order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment record not found".to_string()))?;

        if existing.event_id != request.event_id {
            return Err(AppError::ValidationError(
                "Order does not belong to this event".to_string(),
            ));
        }

        // The order is scoped to the user who created it; another
        // account replaying a valid signature reads as not-found.
        if existing.user_id != user.id {
            return Err(AppError::NotFound("Payment record not found".to_string()));
        }

        let payment = self
            .payments
            .mark_paid(
                &request.razorpay_order_id,
                &request.razorpay_payment_id,
                &request.razorpay_signature,
            )
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Payment has already been verified".to_string())
            })?;

        self.participations
            .insert(payment.event_id, user.id, ParticipantRole::Solo, true, "paid")
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::Conflict("You have already joined this event".to_string())
                } else {
                    e
                }
            })?;

        let pass_id = generate_pass_id();
        let qr_data = qr_payload(payment.event_id, user.id, &pass_id);
        let pass = self
            .passes
            .insert(payment.event_id, user.id, &pass_id, &qr_data)
            .await?;

        self.events
            .record_paid_admission(payment.event_id, payment.amount)
            .await?;

        info!(
            event_id = %payment.event_id,
            user_id = %user.id,
            pass_id = %pass.pass_id,
            "Payment verified, pass issued"
        );

        Ok(pass)
    }

    pub async fn my_passes(&self, user: &User) -> Result<Vec<EventPass>, AppError> {
        self.passes.list_for_user(user.id).await
    }
}

/// Gateway amounts are integer minor units (paise).
fn to_minor_units(price: Decimal) -> Option<i64> {
    (price * Decimal::from(100)).trunc().to_i64()
}

/// Human-readable pass token: "PASS-" plus 12 hex characters.
fn generate_pass_id() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 6];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("PASS-{}", hex::encode(bytes))
}

/// Opaque QR payload, colon-delimited.
fn qr_payload(event_id: Uuid, user_id: Uuid, pass_id: &str) -> String {
    format!("{}:{}:{}", event_id, user_id, pass_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_minor_units_conversion() {
        assert_eq!(to_minor_units(price("499.00")), Some(49900));
        assert_eq!(to_minor_units(price("0.50")), Some(50));
        assert_eq!(to_minor_units(price("10")), Some(1000));
    }

    #[test]
    fn test_pass_id_shape() {
        let pass_id = generate_pass_id();
        assert!(pass_id.starts_with("PASS-"));
        let token = &pass_id["PASS-".len()..];
        assert_eq!(token.len(), 12);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_pass_ids_are_random() {
        assert_ne!(generate_pass_id(), generate_pass_id());
    }

    #[test]
    fn test_qr_payload_format() {
        let event = Uuid::nil();
        let user = Uuid::nil();
        let payload = qr_payload(event, user, "PASS-abcdef012345");
        assert_eq!(
            payload,
            format!("{}:{}:PASS-abcdef012345", event, user)
        );
        assert_eq!(payload.matches(':').count(), 2);
    }
}
