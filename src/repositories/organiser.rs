use sqlx::PgPool;
use uuid::Uuid;

use crate::models::organiser::{Organiser, VERIFICATION_THRESHOLD};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct OrganiserRepository {
    pool: PgPool,
}

impl OrganiserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Organiser, AppError> {
        let organiser = sqlx::query_as::<_, Organiser>(
            r#"
            INSERT INTO organisers (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(organiser)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Organiser>, AppError> {
        let organiser = sqlx::query_as::<_, Organiser>("SELECT * FROM organisers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(organiser)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organiser>, AppError> {
        let organiser = sqlx::query_as::<_, Organiser>("SELECT * FROM organisers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(organiser)
    }

    pub async fn list(&self) -> Result<Vec<Organiser>, AppError> {
        let organisers =
            sqlx::query_as::<_, Organiser>("SELECT * FROM organisers ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(organisers)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Organiser, AppError> {
        let organiser = sqlx::query_as::<_, Organiser>(
            "UPDATE organisers SET is_active = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Organiser not found".to_string()))?;

        Ok(organiser)
    }

    pub async fn set_verified(&self, id: Uuid, is_verified: bool) -> Result<Organiser, AppError> {
        let organiser = sqlx::query_as::<_, Organiser>(
            "UPDATE organisers SET is_verified = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_verified)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Organiser not found".to_string()))?;

        Ok(organiser)
    }

    /// Bump the completed-event counter and auto-verify once the
    /// threshold is crossed, in one statement.
    pub async fn record_completed_event(&self, id: Uuid) -> Result<Organiser, AppError> {
        let organiser = sqlx::query_as::<_, Organiser>(
            r#"
            UPDATE organisers
            SET total_events_created = total_events_created + 1,
                is_verified = is_verified OR total_events_created + 1 >= $2,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(VERIFICATION_THRESHOLD)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Organiser not found".to_string()))?;

        Ok(organiser)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM organisers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
