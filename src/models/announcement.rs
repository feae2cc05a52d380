use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-event announcement channel, seeded with a welcome message when
/// the event is created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnnouncementGroup {
    pub id: Uuid,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub group_id: Uuid,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PostAnnouncementRequest {
    pub body: String,
}
