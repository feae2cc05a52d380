use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::models::team::{
    CreateTeamRequest, InviteAction, Team, TeamInvite, TeamWithMembers,
};
use crate::models::user::User;
use crate::repositories::{NotificationRepository, TeamRepository, UserRepository};
use crate::services::notifier::{NotificationHub, SocketEvent};
use crate::services::side_effects::best_effort;
use crate::utils::error::AppError;

const TEAM_SIZES: [i32; 2] = [2, 4];

/// Fixed-size team formation: invite, accept, reject, with best-effort
/// notification fan-out after each write.
#[derive(Clone)]
pub struct TeamService {
    teams: TeamRepository,
    users: UserRepository,
    notifications: NotificationRepository,
    hub: NotificationHub,
}

impl TeamService {
    pub fn new(
        teams: TeamRepository,
        users: UserRepository,
        notifications: NotificationRepository,
        hub: NotificationHub,
    ) -> Self {
        Self {
            teams,
            users,
            notifications,
            hub,
        }
    }

    /// Invite-picker search: at most 5 matches, no exclusions — the
    /// client filters out users it has already invited.
    pub async fn search_users(&self, query: &str) -> Result<Vec<User>, AppError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.users.search(query.trim()).await
    }

    pub async fn create_team(
        &self,
        request: CreateTeamRequest,
        leader: &User,
    ) -> Result<TeamWithMembers, AppError> {
        if !TEAM_SIZES.contains(&request.size) {
            return Err(AppError::ValidationError(
                "Team size must be 2 or 4".to_string(),
            ));
        }

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Team name is required".to_string()));
        }

        if request.invitee_ids.contains(&leader.id) {
            return Err(AppError::ValidationError(
                "You cannot invite yourself".to_string(),
            ));
        }

        // Under-filled teams are allowed (invites can be sent later);
        // over-filled ones are not.
        if request.invitee_ids.len() > (request.size - 1) as usize {
            return Err(AppError::ValidationError(format!(
                "A team of {} can have at most {} invitees",
                request.size,
                request.size - 1
            )));
        }

        let invitees = self.users.find_many(&request.invitee_ids).await?;
        if invitees.len() != request.invitee_ids.len() {
            return Err(AppError::ValidationError(
                "One or more invited users do not exist".to_string(),
            ));
        }

        let team = self
            .teams
            .create_with_members(name, leader.id, request.size, &request.invitee_ids)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::Conflict("You already have a team with this name".to_string())
                } else {
                    e
                }
            })?;

        info!(team_id = %team.id, leader_id = %leader.id, "Team created");

        // Invites go out after the team exists; each one is independent
        // and allowed to fail without unwinding the others.
        for invitee in &invitees {
            let payload = json!({
                "type": "team_invite",
                "teamId": team.id,
                "teamName": team.name,
                "leader": leader.name,
            });

            best_effort("team_invite_notification", async {
                self.notifications
                    .insert(invitee.id, "team_invite", payload.clone())
                    .await?;
                self.hub
                    .emit(invitee.id, SocketEvent::notification(payload))
                    .await;
                Ok(())
            })
            .await;
        }

        let members = self.teams.members(team.id).await?;
        Ok(TeamWithMembers { team, members })
    }

    pub async fn get_invites(&self, user: &User) -> Result<Vec<TeamInvite>, AppError> {
        self.teams.pending_invites_for(user.id).await
    }

    /// Accept flips the caller's own pending row to accepted; reject
    /// removes it. Both are scoped to (team, caller, pending), so a
    /// user who was never invited gets NotFound instead of mutating
    /// someone else's entry.
    pub async fn respond_to_invite(
        &self,
        team_id: Uuid,
        action: InviteAction,
        user: &User,
    ) -> Result<Team, AppError> {
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

        let applied = match action {
            InviteAction::Accept => self.teams.accept_member(team_id, user.id).await?,
            InviteAction::Reject => self.teams.remove_pending_member(team_id, user.id).await?,
        };

        if !applied {
            return Err(AppError::NotFound(
                "No pending invite for this team".to_string(),
            ));
        }

        info!(team_id = %team_id, user_id = %user.id, action = ?action, "Invite response");

        let payload = json!({
            "type": "invite_response",
            "teamId": team.id,
            "user": user.name,
            "action": match action {
                InviteAction::Accept => "accept",
                InviteAction::Reject => "reject",
            },
        });

        best_effort("invite_response_notification", async {
            self.notifications
                .insert(team.leader_id, "invite_response", payload.clone())
                .await?;
            self.hub
                .emit(team.leader_id, SocketEvent::notification(payload))
                .await;
            Ok(())
        })
        .await;

        Ok(team)
    }
}
