use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::{Event, EventStatus, UpdateEventRequest};
use crate::utils::error::AppError;

/// Column values for a new event row, assembled by the lifecycle
/// service after validation.
#[derive(Debug)]
pub struct NewEvent {
    pub organiser_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub banner_url: String,
    pub event_date: chrono::DateTime<chrono::Utc>,
    pub event_start: Option<chrono::DateTime<chrono::Utc>>,
    pub event_end: Option<chrono::DateTime<chrono::Utc>>,
    pub registration_deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub participation_type: crate::models::event::ParticipationType,
    pub max_teams: Option<i32>,
    pub max_participants: Option<i32>,
    pub total_capacity: Option<i32>,
    pub is_paid: bool,
    pub price: Decimal,
    pub mode: crate::models::event::EventMode,
    pub venue_address: Option<String>,
    pub location_name: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub status: EventStatus,
}

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewEvent) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                organiser_id, title, description, banner_url,
                event_date, event_start, event_end, registration_deadline,
                participation_type, max_teams, max_participants, total_capacity,
                is_paid, price, mode, venue_address, location_name,
                longitude, latitude, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#,
        )
        .bind(new.organiser_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.banner_url)
        .bind(new.event_date)
        .bind(new.event_start)
        .bind(new.event_end)
        .bind(new.registration_deadline)
        .bind(new.participation_type)
        .bind(new.max_teams)
        .bind(new.max_participants)
        .bind(new.total_capacity)
        .bind(new.is_paid)
        .bind(new.price)
        .bind(new.mode)
        .bind(new.venue_address)
        .bind(new.location_name)
        .bind(new.longitude)
        .bind(new.latitude)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    pub async fn list_published(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE status = 'published' ORDER BY event_date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn list_for_organiser(&self, organiser_id: Uuid) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE organiser_id = $1 ORDER BY created_at DESC",
        )
        .bind(organiser_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Scoped mutation: the organiser filter doubles as the ownership
    /// check, so a foreign id reads as not-found.
    pub async fn update_scoped(
        &self,
        id: Uuid,
        organiser_id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                banner_url = COALESCE($5, banner_url),
                event_date = COALESCE($6, event_date),
                event_start = COALESCE($7, event_start),
                event_end = COALESCE($8, event_end),
                registration_deadline = COALESCE($9, registration_deadline),
                total_capacity = COALESCE($10, total_capacity),
                updated_at = now()
            WHERE id = $1 AND organiser_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(organiser_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.banner_url)
        .bind(request.event_date)
        .bind(request.event_start)
        .bind(request.event_end)
        .bind(request.registration_deadline)
        .bind(request.total_capacity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        Ok(event)
    }

    pub async fn set_status_scoped(
        &self,
        id: Uuid,
        organiser_id: Uuid,
        status: EventStatus,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            "UPDATE events SET status = $3, updated_at = now() WHERE id = $1 AND organiser_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(organiser_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        Ok(event)
    }

    /// Delete scoped to the owner. Dependent participations, payments,
    /// passes, announcements and top-event slots go with it via FK
    /// cascade, so the whole teardown is one atomic statement.
    pub async fn delete_scoped(&self, id: Uuid, organiser_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND organiser_id = $2")
            .bind(id)
            .bind(organiser_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(())
    }

    /// Paid admission bookkeeping: one seat plus the captured amount.
    pub async fn record_paid_admission(&self, id: Uuid, amount: Decimal) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE events
            SET sold_seats = sold_seats + 1,
                revenue = revenue + $2,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_status(&self, status: EventStatus) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn total_revenue(&self) -> Result<Decimal, AppError> {
        let revenue: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(revenue), 0) FROM events")
                .fetch_one(&self.pool)
                .await?;

        Ok(revenue)
    }
}
