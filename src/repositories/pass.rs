use sqlx::PgPool;
use uuid::Uuid;

use crate::models::pass::EventPass;
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct PassRepository {
    pool: PgPool,
}

impl PassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        pass_id: &str,
        qr_data: &str,
    ) -> Result<EventPass, AppError> {
        let pass = sqlx::query_as::<_, EventPass>(
            r#"
            INSERT INTO event_passes (event_id, user_id, pass_id, qr_data)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(pass_id)
        .bind(qr_data)
        .fetch_one(&self.pool)
        .await?;

        Ok(pass)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<EventPass>, AppError> {
        let passes = sqlx::query_as::<_, EventPass>(
            "SELECT * FROM event_passes WHERE user_id = $1 ORDER BY issued_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(passes)
    }
}
