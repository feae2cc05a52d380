use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipationType {
    Solo,
    Duo,
    Squad,
}

impl ParticipationType {
    /// Fixed team size per type; solo has no team.
    pub fn team_size(self) -> Option<i32> {
        match self {
            ParticipationType::Solo => None,
            ParticipationType::Duo => Some(2),
            ParticipationType::Squad => Some(4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub organiser_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub banner_url: String,
    pub event_date: DateTime<Utc>,
    pub event_start: Option<DateTime<Utc>>,
    pub event_end: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub participation_type: ParticipationType,
    pub max_teams: Option<i32>,
    pub max_participants: Option<i32>,
    pub total_capacity: Option<i32>,
    pub is_paid: bool,
    pub price: Decimal,
    pub mode: EventMode,
    pub venue_address: Option<String>,
    pub location_name: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub status: EventStatus,
    pub sold_seats: i32,
    pub revenue: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team-size rules for an event, as submitted by the organiser client.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamCriteria {
    #[serde(rename = "type")]
    pub participation_type: ParticipationType,
    pub max_teams_allowed: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pricing {
    pub is_paid: bool,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueDetails {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub banner_url: String,
    pub event_date: DateTime<Utc>,
    pub event_start: Option<DateTime<Utc>>,
    pub event_end: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub team_criteria: TeamCriteria,
    pub pricing: Pricing,
    pub mode: EventMode,
    pub venue_details: Option<VenueDetails>,
    pub total_capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_start: Option<DateTime<Utc>>,
    pub event_end: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub total_capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: EventStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_sizes_are_fixed_per_type() {
        assert_eq!(ParticipationType::Solo.team_size(), None);
        assert_eq!(ParticipationType::Duo.team_size(), Some(2));
        assert_eq!(ParticipationType::Squad.team_size(), Some(4));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventStatus::Published).unwrap(),
            "\"published\""
        );
        assert_eq!(
            serde_json::to_string(&EventMode::Offline).unwrap(),
            "\"offline\""
        );
    }
}
