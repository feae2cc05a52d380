use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::auth::AuthOrganiser;
use crate::models::announcement::PostAnnouncementRequest;
use crate::models::event::{CreateEventRequest, StatusChangeRequest, UpdateEventRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn create_event(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let event = state.lifecycle.create_event(&organiser, request).await?;
    Ok(created(event, "Event created").into_response())
}

pub async fn list_my_events(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
) -> Result<Response, AppError> {
    let events = state.lifecycle.list_for_organiser(&organiser).await?;
    Ok(success(events, "Events fetched").into_response())
}

pub async fn get_my_event(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    // Ownership reads as existence: someone else's event is not found.
    let event = state
        .events
        .find_by_id(event_id)
        .await?
        .filter(|e| e.organiser_id == organiser.id)
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(success(event, "Event fetched").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Response, AppError> {
    let event = state
        .lifecycle
        .update_event(event_id, &organiser, request)
        .await?;
    Ok(success(event, "Event updated").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.lifecycle.delete_event(event_id, &organiser).await?;
    Ok(empty_success("Event deleted").into_response())
}

pub async fn change_status(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Response, AppError> {
    let event = state
        .lifecycle
        .change_status(event_id, &organiser, request)
        .await?;
    Ok(success(event, "Event status updated").into_response())
}

pub async fn post_announcement(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<PostAnnouncementRequest>,
) -> Result<Response, AppError> {
    if request.body.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Announcement body is required".to_string(),
        ));
    }

    let announcement = state
        .announcements
        .post_scoped(event_id, organiser.id, request.body.trim())
        .await?;
    Ok(created(announcement, "Announcement posted").into_response())
}

pub async fn list_announcements(
    State(state): State<AppState>,
    Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    // Same ownership-as-filter shape as the single-event read.
    state
        .events
        .find_by_id(event_id)
        .await?
        .filter(|e| e.organiser_id == organiser.id)
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let announcements = state.announcements.list_for_event(event_id).await?;
    Ok(success(announcements, "Announcements fetched").into_response())
}
