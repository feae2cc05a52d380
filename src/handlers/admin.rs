use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::cookies::{clear_cookie, session_cookie, set_cookie, ADMIN_COOKIE};
use crate::auth::jwt::{issue_token, SessionRole};
use crate::auth::password::verify_password;
use crate::auth::AuthAdmin;
use crate::models::organiser::LoginRequest;
use crate::models::top_event::SetTopEventRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let admin = state
        .admins
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    if !verify_password(&request.password, &admin.password_hash) {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = issue_token(&state.config.jwt_secret, admin.id, SessionRole::Admin)?;

    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, session_cookie(ADMIN_COOKIE, &token));

    Ok((headers, success(admin, "Logged in")).into_response())
}

pub async fn logout() -> Response {
    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, clear_cookie(ADMIN_COOKIE));

    (headers, empty_success("Logged out")).into_response()
}

pub async fn me(Extension(AuthAdmin(admin)): Extension<AuthAdmin>) -> Response {
    success(admin, "Session fetched").into_response()
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Response, AppError> {
    let stats = state.curation.dashboard().await?;
    Ok(success(stats, "Dashboard fetched").into_response())
}

pub async fn list_organisers(State(state): State<AppState>) -> Result<Response, AppError> {
    let organisers = state.curation.list_organisers().await?;
    Ok(success(organisers, "Organisers fetched").into_response())
}

#[derive(Debug, Deserialize)]
pub struct StatusToggleRequest {
    pub is_active: bool,
}

pub async fn set_organiser_status(
    State(state): State<AppState>,
    Path(organiser_id): Path<Uuid>,
    Json(request): Json<StatusToggleRequest>,
) -> Result<Response, AppError> {
    let organiser = state
        .curation
        .set_organiser_status(organiser_id, request.is_active)
        .await?;
    Ok(success(organiser, "Organiser status updated").into_response())
}

pub async fn verify_organiser(
    State(state): State<AppState>,
    Path(organiser_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let organiser = state.curation.verify_organiser(organiser_id).await?;
    Ok(success(organiser, "Organiser verified").into_response())
}

pub async fn list_top_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let entries = state.curation.list_top_events().await?;
    Ok(success(entries, "Top events fetched").into_response())
}

pub async fn set_top_event(
    State(state): State<AppState>,
    Json(request): Json<SetTopEventRequest>,
) -> Result<Response, AppError> {
    let slot = state
        .curation
        .set_top_event(request.event_id, request.position)
        .await?;
    Ok(success(slot, "Top event assigned").into_response())
}

pub async fn remove_top_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.curation.remove_top_event(event_id).await?;
    Ok(empty_success("Top event removed").into_response())
}
