use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::team::{CreateTeamRequest, RespondToInviteRequest};
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Search result shape for the invite picker: no profile internals.
#[derive(Serialize)]
struct UserSummary {
    id: Uuid,
    name: String,
    email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    let users = state.teams.search_users(&query.q).await?;
    let summaries: Vec<UserSummary> = users.into_iter().map(UserSummary::from).collect();
    Ok(success(summaries, "Users fetched").into_response())
}

pub async fn create_team(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Response, AppError> {
    let team = state.teams.create_team(request, &user).await?;
    Ok(created(team, "Team created").into_response())
}

pub async fn get_invites(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Response, AppError> {
    let invites = state.teams.get_invites(&user).await?;
    Ok(success(invites, "Invites fetched").into_response())
}

pub async fn respond_to_invite(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(team_id): Path<Uuid>,
    Json(request): Json<RespondToInviteRequest>,
) -> Result<Response, AppError> {
    let team = state
        .teams
        .respond_to_invite(team_id, request.action, &user)
        .await?;
    Ok(success(team, "Invite response recorded").into_response())
}
