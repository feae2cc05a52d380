use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::event::EventStatus;
use crate::models::organiser::Organiser;
use crate::models::top_event::{TopEvent, TopEventEntry};
use crate::repositories::{EventRepository, OrganiserRepository, TopEventRepository, UserRepository};
use crate::utils::error::AppError;

const TOP_POSITIONS: std::ops::RangeInclusive<i32> = 1..=3;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_organisers: i64,
    pub total_users: i64,
    pub total_events: i64,
    pub published_events: i64,
    pub completed_events: i64,
    pub total_revenue: Decimal,
}

/// Admin curation: the three ranked front-page slots, organiser
/// moderation and dashboard aggregates.
#[derive(Clone)]
pub struct CurationService {
    events: EventRepository,
    organisers: OrganiserRepository,
    users: UserRepository,
    top_events: TopEventRepository,
}

impl CurationService {
    pub fn new(
        events: EventRepository,
        organisers: OrganiserRepository,
        users: UserRepository,
        top_events: TopEventRepository,
    ) -> Self {
        Self {
            events,
            organisers,
            users,
            top_events,
        }
    }

    /// Promote a published event into one of the three ranked slots,
    /// displacing whatever held that rank or referenced that event.
    pub async fn set_top_event(&self, event_id: Uuid, position: i32) -> Result<TopEvent, AppError> {
        if !TOP_POSITIONS.contains(&position) {
            return Err(AppError::ValidationError(
                "Position must be 1, 2 or 3".to_string(),
            ));
        }

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.status != EventStatus::Published {
            return Err(AppError::ValidationError(
                "Only published events can be promoted".to_string(),
            ));
        }

        let slot = self.top_events.assign(event_id, position).await?;

        info!(event_id = %event_id, position, "Top event assigned");

        Ok(slot)
    }

    pub async fn remove_top_event(&self, event_id: Uuid) -> Result<(), AppError> {
        self.top_events.remove(event_id).await
    }

    pub async fn list_top_events(&self) -> Result<Vec<TopEventEntry>, AppError> {
        self.top_events.list_entries().await
    }

    pub async fn list_organisers(&self) -> Result<Vec<Organiser>, AppError> {
        self.organisers.list().await
    }

    pub async fn set_organiser_status(
        &self,
        organiser_id: Uuid,
        is_active: bool,
    ) -> Result<Organiser, AppError> {
        let organiser = self.organisers.set_active(organiser_id, is_active).await?;
        info!(organiser_id = %organiser_id, is_active, "Organiser status changed");
        Ok(organiser)
    }

    pub async fn verify_organiser(&self, organiser_id: Uuid) -> Result<Organiser, AppError> {
        self.organisers.set_verified(organiser_id, true).await
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, AppError> {
        Ok(DashboardStats {
            total_organisers: self.organisers.count().await?,
            total_users: self.users.count().await?,
            total_events: self.events.count().await?,
            published_events: self.events.count_by_status(EventStatus::Published).await?,
            completed_events: self.events.count_by_status(EventStatus::Completed).await?,
            total_revenue: self.events.total_revenue().await?,
        })
    }
}
