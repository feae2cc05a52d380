use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::event::EventStatus;
use crate::models::user::UpdateProfileRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
pub struct FirebaseExchangeRequest {
    pub id_token: String,
}

/// Exchange a Firebase ID token for an app profile, creating the row
/// on first sight.
pub async fn firebase_exchange(
    State(state): State<AppState>,
    Json(request): Json<FirebaseExchangeRequest>,
) -> Result<Response, AppError> {
    let identity = state.verifier.verify(&request.id_token).await?;

    let user = state
        .users
        .upsert_by_firebase_uid(&identity.uid, &identity.name, &identity.email)
        .await?;

    Ok(success(user, "Signed in").into_response())
}

pub async fn get_profile(Extension(AuthUser(user)): Extension<AuthUser>) -> Response {
    success(user, "Profile fetched").into_response()
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Response, AppError> {
    let updated = state.users.update_profile(user.id, request).await?;
    Ok(success(updated, "Profile updated").into_response())
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.list_published().await?;
    Ok(success(events, "Events fetched").into_response())
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state
        .events
        .find_by_id(event_id)
        .await?
        .filter(|e| e.status == EventStatus::Published)
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(success(event, "Event fetched").into_response())
}

pub async fn join_event(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let participation = state.registration.join_event(event_id, &user).await?;
    Ok(created(participation, "Joined event").into_response())
}

pub async fn my_events(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Response, AppError> {
    let participations = state.registration.my_events(&user).await?;
    Ok(success(participations, "Joined events fetched").into_response())
}

pub async fn my_passes(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Response, AppError> {
    let passes = state.payments.my_passes(&user).await?;
    Ok(success(passes, "Passes fetched").into_response())
}

pub async fn my_notifications(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Response, AppError> {
    let notifications = state.notifications.list_for_user(user.id).await?;
    Ok(success(notifications, "Notifications fetched").into_response())
}
