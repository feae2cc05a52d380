use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Pending,
    Accepted,
}

/// Fixed-size team (2 or 4). Name is unique per leader; the leader is
/// always present as an accepted member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub leader_id: Uuid,
    pub size: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub status: MemberStatus,
    pub position: i32,
}

/// Team plus member rows, the shape handlers return.
#[derive(Debug, Serialize)]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMember>,
}

/// A pending invite from the invitee's point of view.
#[derive(Debug, Serialize, FromRow)]
pub struct TeamInvite {
    pub team_id: Uuid,
    pub team_name: String,
    pub size: i32,
    pub leader_id: Uuid,
    pub leader_name: String,
    pub leader_email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub size: i32,
    pub invitee_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteAction {
    Accept,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct RespondToInviteRequest {
    pub action: InviteAction,
}
