use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Solo,
    Leader,
    Member,
}

/// One user admitted into one event. The (event_id, user_id) pair is
/// unique at the store level, so a duplicate join surfaces as a
/// constraint violation rather than a racy pre-check.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventParticipation {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub team_id: Option<Uuid>,
    pub role: ParticipantRole,
    pub payment_verified: bool,
    pub mode: String,
    pub joined_at: DateTime<Utc>,
}
