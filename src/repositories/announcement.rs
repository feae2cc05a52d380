use sqlx::PgPool;
use uuid::Uuid;

use crate::models::announcement::{Announcement, AnnouncementGroup};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the per-event channel with its welcome message.
    pub async fn create_group_with_welcome(
        &self,
        event_id: Uuid,
        welcome: &str,
    ) -> Result<AnnouncementGroup, AppError> {
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, AnnouncementGroup>(
            "INSERT INTO announcement_groups (event_id) VALUES ($1) RETURNING *",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO announcements (group_id, body) VALUES ($1, $2)")
            .bind(group.id)
            .bind(welcome)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(group)
    }

    /// Post into an event's channel, scoped to the owning organiser so
    /// foreign events read as not-found.
    pub async fn post_scoped(
        &self,
        event_id: Uuid,
        organiser_id: Uuid,
        body: &str,
    ) -> Result<Announcement, AppError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (group_id, body)
            SELECT g.id, $3
            FROM announcement_groups g
            JOIN events e ON e.id = g.event_id
            WHERE g.event_id = $1 AND e.organiser_id = $2
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(organiser_id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        Ok(announcement)
    }

    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT a.*
            FROM announcements a
            JOIN announcement_groups g ON g.id = a.group_id
            WHERE g.event_id = $1
            ORDER BY a.posted_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }
}
