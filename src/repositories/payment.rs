use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payment::Payment;
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_created(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        razorpay_order_id: &str,
        amount: Decimal,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (event_id, user_id, razorpay_order_id, amount, status)
            VALUES ($1, $2, $3, $4, 'created')
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(razorpay_order_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, AppError> {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE razorpay_order_id = $1")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payment)
    }

    /// created -> paid transition, scoped to status = 'created' so a
    /// replayed verification cannot flip the row twice. Returns None
    /// when the row was not in 'created' state.
    pub async fn mark_paid(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = 'paid',
                razorpay_payment_id = $2,
                razorpay_signature = $3,
                updated_at = now()
            WHERE razorpay_order_id = $1 AND status = 'created'
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(payment_id)
        .bind(signature)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }
}
