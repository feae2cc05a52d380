use sqlx::PgPool;
use uuid::Uuid;

use crate::models::participation::{EventParticipation, ParticipantRole};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct ParticipationRepository {
    pool: PgPool,
}

impl ParticipationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a participation row. The unique (event_id, user_id) index
    /// is the duplicate-join guard; a violation surfaces as a database
    /// error the service maps to Conflict.
    pub async fn insert(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        payment_verified: bool,
        mode: &str,
    ) -> Result<EventParticipation, AppError> {
        let participation = sqlx::query_as::<_, EventParticipation>(
            r#"
            INSERT INTO event_participations (event_id, user_id, role, payment_verified, mode)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(role)
        .bind(payment_verified)
        .bind(mode)
        .fetch_one(&self.pool)
        .await?;

        Ok(participation)
    }

    /// Participation insert and seat claim in one transaction. The row
    /// goes in first, so a duplicate join hits the unique index before
    /// any seat moves; the seat is then claimed only while the event is
    /// published and below capacity. Returns None, rolling the row
    /// back, when no seat was available.
    pub async fn insert_with_seat_claim(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        payment_verified: bool,
        mode: &str,
    ) -> Result<Option<EventParticipation>, AppError> {
        let mut tx = self.pool.begin().await?;

        let participation = sqlx::query_as::<_, EventParticipation>(
            r#"
            INSERT INTO event_participations (event_id, user_id, role, payment_verified, mode)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(role)
        .bind(payment_verified)
        .bind(mode)
        .fetch_one(&mut *tx)
        .await?;

        let claimed = sqlx::query(
            r#"
            UPDATE events
            SET sold_seats = sold_seats + 1, updated_at = now()
            WHERE id = $1
              AND status = 'published'
              AND (total_capacity IS NULL OR sold_seats < total_capacity)
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some(participation))
    }

    /// A user's joined events, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<EventParticipation>, AppError> {
        let participations = sqlx::query_as::<_, EventParticipation>(
            "SELECT * FROM event_participations WHERE user_id = $1 ORDER BY joined_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participations)
    }
}
