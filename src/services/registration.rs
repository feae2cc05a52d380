use chrono::Utc;
use tracing::info;

use crate::models::event::EventStatus;
use crate::models::participation::{EventParticipation, ParticipantRole};
use crate::models::user::User;
use crate::repositories::{EventRepository, ParticipationRepository};
use crate::utils::error::AppError;
use uuid::Uuid;

/// Free-event admission: capacity and deadline enforcement plus the
/// participation record.
#[derive(Clone)]
pub struct RegistrationService {
    events: EventRepository,
    participations: ParticipationRepository,
}

impl RegistrationService {
    pub fn new(events: EventRepository, participations: ParticipationRepository) -> Self {
        Self {
            events,
            participations,
        }
    }

    /// Admit `user` into a free event. The participation insert and the
    /// conditional seat claim run in one transaction with the insert
    /// first, so a repeat join always reads as Conflict (even on a full
    /// event) and a failed claim never leaves the seat count inflated.
    pub async fn join_event(
        &self,
        event_id: Uuid,
        user: &User,
    ) -> Result<EventParticipation, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.status != EventStatus::Published {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        if event.is_paid {
            return Err(AppError::ValidationError(
                "This event requires payment to join".to_string(),
            ));
        }

        if let Some(deadline) = event.registration_deadline {
            if Utc::now() > deadline {
                return Err(AppError::ValidationError(
                    "Registration deadline has passed".to_string(),
                ));
            }
        }

        let participation = match self
            .participations
            .insert_with_seat_claim(event_id, user.id, ParticipantRole::Solo, false, "free")
            .await
        {
            Ok(Some(p)) => p,
            Ok(None) => {
                return Err(AppError::ValidationError("Event is full".to_string()));
            }
            Err(e) if e.is_unique_violation() => {
                return Err(AppError::Conflict(
                    "You have already joined this event".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        info!(event_id = %event_id, user_id = %user.id, "User joined event");

        Ok(participation)
    }

    pub async fn my_events(&self, user: &User) -> Result<Vec<EventParticipation>, AppError> {
        self.participations.list_for_user(user.id).await
    }
}
