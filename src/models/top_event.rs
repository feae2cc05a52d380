use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin-curated front-page slot. Both columns are unique: at most one
/// event per rank and one rank per event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopEvent {
    pub event_id: Uuid,
    pub position: i32,
    pub assigned_at: DateTime<Utc>,
}

/// Slot joined with a summary of the event it promotes.
#[derive(Debug, Serialize, FromRow)]
pub struct TopEventEntry {
    pub event_id: Uuid,
    pub position: i32,
    pub title: String,
    pub banner_url: String,
    pub event_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SetTopEventRequest {
    pub event_id: Uuid,
    pub position: i32,
}
