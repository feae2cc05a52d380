use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event organiser account. `is_active` gates login and every
/// organiser-protected route; `is_verified` flips automatically once
/// enough events complete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organiser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub total_events_created: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Events completed before an organiser is auto-verified.
pub const VERIFICATION_THRESHOLD: i32 = 10;

#[derive(Debug, Deserialize)]
pub struct RegisterOrganiserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
