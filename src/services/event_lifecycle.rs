use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::event::{
    CreateEventRequest, Event, EventMode, EventStatus, StatusChangeRequest, UpdateEventRequest,
};
use crate::models::organiser::Organiser;
use crate::repositories::event::NewEvent;
use crate::repositories::{AnnouncementRepository, EventRepository, OrganiserRepository};
use crate::services::side_effects::best_effort;
use crate::utils::error::AppError;

/// Organiser-owned event CRUD, derived-field computation and status
/// transitions.
#[derive(Clone)]
pub struct EventLifecycleService {
    events: EventRepository,
    organisers: OrganiserRepository,
    announcements: AnnouncementRepository,
}

impl EventLifecycleService {
    pub fn new(
        events: EventRepository,
        organisers: OrganiserRepository,
        announcements: AnnouncementRepository,
    ) -> Self {
        Self {
            events,
            organisers,
            announcements,
        }
    }

    pub async fn create_event(
        &self,
        organiser: &Organiser,
        request: CreateEventRequest,
    ) -> Result<Event, AppError> {
        let new = build_event(organiser.id, request)?;

        let event = self.events.create(new).await?;

        info!(event_id = %event.id, organiser_id = %organiser.id, "Event created");

        // The announcement channel is a courtesy; event creation has
        // already succeeded if this fails.
        let welcome = format!("Welcome to {}! Updates will be posted here.", event.title);
        best_effort("welcome_announcement", async {
            self.announcements
                .create_group_with_welcome(event.id, &welcome)
                .await
        })
        .await;

        Ok(event)
    }

    pub async fn list_for_organiser(&self, organiser: &Organiser) -> Result<Vec<Event>, AppError> {
        self.events.list_for_organiser(organiser.id).await
    }

    pub async fn update_event(
        &self,
        event_id: Uuid,
        organiser: &Organiser,
        request: UpdateEventRequest,
    ) -> Result<Event, AppError> {
        let current = self
            .events
            .find_by_id(event_id)
            .await?
            .filter(|e| e.organiser_id == organiser.id)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        // Absent fields keep their stored values (COALESCE), so the
        // schedule pair is checked against the merged result.
        validate_schedule(
            request
                .registration_deadline
                .or(current.registration_deadline),
            request.event_date.unwrap_or(current.event_date),
        )?;

        self.events
            .update_scoped(event_id, organiser.id, request)
            .await
    }

    pub async fn delete_event(&self, event_id: Uuid, organiser: &Organiser) -> Result<(), AppError> {
        self.events.delete_scoped(event_id, organiser.id).await
    }

    /// Status transition. Completing an event bumps the organiser's
    /// completed-event count, which may auto-verify the account; that
    /// bookkeeping is fire-and-forget.
    pub async fn change_status(
        &self,
        event_id: Uuid,
        organiser: &Organiser,
        request: StatusChangeRequest,
    ) -> Result<Event, AppError> {
        let event = self
            .events
            .set_status_scoped(event_id, organiser.id, request.status)
            .await?;

        if event.status == EventStatus::Completed {
            best_effort("organiser_completion_counter", async {
                self.organisers.record_completed_event(organiser.id).await
            })
            .await;
        }

        Ok(event)
    }
}

/// Registration must close before the event starts. Enforced on
/// create and on every update against the merged values.
fn validate_schedule(
    registration_deadline: Option<DateTime<Utc>>,
    event_date: DateTime<Utc>,
) -> Result<(), AppError> {
    if let Some(deadline) = registration_deadline {
        if deadline >= event_date {
            return Err(AppError::ValidationError(
                "Registration deadline must be before the event date".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate the request and compute derived fields. Malformed or
/// inconsistent input is rejected with a 400 rather than degraded.
fn build_event(organiser_id: Uuid, request: CreateEventRequest) -> Result<NewEvent, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::ValidationError("Title is required".to_string()));
    }

    if request.banner_url.trim().is_empty() {
        return Err(AppError::ValidationError("Banner is required".to_string()));
    }

    if request.pricing.is_paid && request.pricing.price <= rust_decimal::Decimal::ZERO {
        return Err(AppError::ValidationError(
            "Paid events must have a positive price".to_string(),
        ));
    }

    validate_schedule(request.registration_deadline, request.event_date)?;

    let participation_type = request.team_criteria.participation_type;

    let (max_teams, max_participants, total_capacity) = match participation_type.team_size() {
        None => {
            // Solo events take their capacity directly.
            (None, request.total_capacity, request.total_capacity)
        }
        Some(team_size) => {
            let max_teams = request.team_criteria.max_teams_allowed.ok_or_else(|| {
                AppError::ValidationError("Max teams is required for team events".to_string())
            })?;
            if max_teams <= 0 {
                return Err(AppError::ValidationError(
                    "Max teams must be positive".to_string(),
                ));
            }
            let max_participants = max_teams * team_size;
            (Some(max_teams), Some(max_participants), Some(max_participants))
        }
    };

    let (venue_address, location_name, longitude, latitude) = match request.mode {
        EventMode::Offline => {
            let venue = request.venue_details.ok_or_else(|| {
                AppError::ValidationError("Venue details are required for offline events".to_string())
            })?;
            if venue.address.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Venue address is required".to_string(),
                ));
            }
            if !(-90.0..=90.0).contains(&venue.latitude)
                || !(-180.0..=180.0).contains(&venue.longitude)
            {
                return Err(AppError::ValidationError("Invalid Coordinates".to_string()));
            }
            (
                Some(venue.address.clone()),
                venue.address,
                Some(venue.longitude),
                Some(venue.latitude),
            )
        }
        EventMode::Online => (None, "Online Event".to_string(), None, None),
    };

    Ok(NewEvent {
        organiser_id,
        title: request.title.trim().to_string(),
        description: request.description,
        banner_url: request.banner_url,
        event_date: request.event_date,
        event_start: request.event_start,
        event_end: request.event_end,
        registration_deadline: request.registration_deadline,
        participation_type,
        max_teams,
        max_participants,
        total_capacity,
        is_paid: request.pricing.is_paid,
        price: request.pricing.price,
        mode: request.mode,
        venue_address,
        location_name,
        longitude,
        latitude,
        // Events go live immediately; there is no draft-by-default path.
        status: EventStatus::Published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    use crate::models::event::{ParticipationType, Pricing, TeamCriteria, VenueDetails};

    fn base_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Hack Night".to_string(),
            description: None,
            banner_url: "https://cdn.example/banner.png".to_string(),
            event_date: Utc::now() + Duration::days(30),
            event_start: None,
            event_end: None,
            registration_deadline: Some(Utc::now() + Duration::days(20)),
            team_criteria: TeamCriteria {
                participation_type: ParticipationType::Solo,
                max_teams_allowed: None,
            },
            pricing: Pricing {
                is_paid: false,
                price: Decimal::ZERO,
            },
            mode: EventMode::Online,
            venue_details: None,
            total_capacity: Some(100),
        }
    }

    fn organiser_id() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_solo_online_event_is_published_with_online_location() {
        let new = build_event(organiser_id(), base_request()).unwrap();
        assert_eq!(new.status, EventStatus::Published);
        assert_eq!(new.location_name, "Online Event");
        assert_eq!(new.longitude, None);
        assert_eq!(new.total_capacity, Some(100));
    }

    #[test]
    fn test_missing_banner_is_rejected() {
        let mut request = base_request();
        request.banner_url = " ".to_string();
        let err = build_event(organiser_id(), request).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_paid_event_requires_positive_price() {
        let mut request = base_request();
        request.pricing = Pricing {
            is_paid: true,
            price: Decimal::ZERO,
        };
        assert!(build_event(organiser_id(), request).is_err());
    }

    #[test]
    fn test_deadline_after_event_date_is_rejected() {
        let mut request = base_request();
        request.registration_deadline = Some(request.event_date + Duration::days(1));
        assert!(build_event(organiser_id(), request).is_err());
    }

    #[test]
    fn test_schedule_check_covers_boundary_and_absent_deadline() {
        let date = Utc::now() + Duration::days(10);
        assert!(validate_schedule(Some(date), date).is_err());
        assert!(validate_schedule(Some(date + Duration::hours(1)), date).is_err());
        assert!(validate_schedule(Some(date - Duration::hours(1)), date).is_ok());
        assert!(validate_schedule(None, date).is_ok());
    }

    #[test]
    fn test_squad_capacity_is_derived_from_team_count() {
        let mut request = base_request();
        request.team_criteria = TeamCriteria {
            participation_type: ParticipationType::Squad,
            max_teams_allowed: Some(8),
        };
        let new = build_event(organiser_id(), request).unwrap();
        assert_eq!(new.max_teams, Some(8));
        assert_eq!(new.max_participants, Some(32));
        assert_eq!(new.total_capacity, Some(32));
    }

    #[test]
    fn test_team_event_without_max_teams_is_rejected() {
        let mut request = base_request();
        request.team_criteria = TeamCriteria {
            participation_type: ParticipationType::Duo,
            max_teams_allowed: None,
        };
        assert!(build_event(organiser_id(), request).is_err());
    }

    #[test]
    fn test_offline_event_with_bad_latitude_is_rejected() {
        let mut request = base_request();
        request.mode = EventMode::Offline;
        request.venue_details = Some(VenueDetails {
            address: "MG Road, Mumbai".to_string(),
            latitude: 200.0,
            longitude: 72.87,
        });

        let err = build_event(organiser_id(), request).unwrap_err();
        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, "Invalid Coordinates"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_offline_event_stores_geo_in_lng_lat_order() {
        let mut request = base_request();
        request.mode = EventMode::Offline;
        request.venue_details = Some(VenueDetails {
            address: "MG Road, Mumbai".to_string(),
            latitude: 19.07,
            longitude: 72.87,
        });

        let new = build_event(organiser_id(), request).unwrap();
        assert_eq!(new.longitude, Some(72.87));
        assert_eq!(new.latitude, Some(19.07));
        assert_eq!(new.location_name, "MG Road, Mumbai");
    }
}
