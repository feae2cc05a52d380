use sqlx::PgPool;
use uuid::Uuid;

use crate::models::top_event::{TopEvent, TopEventEntry};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct TopEventRepository {
    pool: PgPool,
}

impl TopEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace whatever holds this position or references this event,
    /// then insert the fresh slot. Both steps run in one transaction so
    /// a crash cannot leave the slot empty.
    pub async fn assign(&self, event_id: Uuid, position: i32) -> Result<TopEvent, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM top_events WHERE event_id = $1 OR position = $2")
            .bind(event_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;

        let slot = sqlx::query_as::<_, TopEvent>(
            "INSERT INTO top_events (event_id, position) VALUES ($1, $2) RETURNING *",
        )
        .bind(event_id)
        .bind(position)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(slot)
    }

    pub async fn remove(&self, event_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM top_events WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Top event not found".to_string()));
        }

        Ok(())
    }

    pub async fn list_entries(&self) -> Result<Vec<TopEventEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopEventEntry>(
            r#"
            SELECT t.event_id, t.position, e.title, e.banner_url, e.event_date
            FROM top_events t
            JOIN events e ON e.id = t.event_id
            ORDER BY t.position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
