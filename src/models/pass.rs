use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Entry pass issued after a verified payment. Immutable once issued,
/// except for the check-in flag.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventPass {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub pass_id: String,
    pub qr_data: String,
    pub checked_in: bool,
    pub issued_at: DateTime<Utc>,
}
