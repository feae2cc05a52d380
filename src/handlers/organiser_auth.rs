use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::auth::cookies::{clear_cookie, session_cookie, set_cookie, ORGANISER_COOKIE};
use crate::auth::jwt::{issue_token, SessionRole};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthOrganiser;
use crate::models::organiser::{LoginRequest, RegisterOrganiserRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterOrganiserRequest>,
) -> Result<Response, AppError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Name and email are required".to_string(),
        ));
    }
    if request.password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let organiser = state
        .organisers
        .create(request.name.trim(), request.email.trim(), &password_hash)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("Email already registered".to_string())
            } else {
                e
            }
        })?;

    let token = issue_token(&state.config.jwt_secret, organiser.id, SessionRole::Organiser)?;

    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, session_cookie(ORGANISER_COOKIE, &token));

    Ok((headers, created(organiser, "Organiser registered")).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let organiser = state
        .organisers
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    if !verify_password(&request.password, &organiser.password_hash) {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    // Deactivation blocks login outright, not just protected routes.
    if !organiser.is_active {
        return Err(AppError::AuthError("Account disabled".to_string()));
    }

    let token = issue_token(&state.config.jwt_secret, organiser.id, SessionRole::Organiser)?;

    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, session_cookie(ORGANISER_COOKIE, &token));

    Ok((headers, success(organiser, "Logged in")).into_response())
}

pub async fn logout() -> Response {
    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, clear_cookie(ORGANISER_COOKIE));

    (headers, empty_success("Logged out")).into_response()
}

pub async fn me(Extension(AuthOrganiser(organiser)): Extension<AuthOrganiser>) -> Response {
    success(organiser, "Session fetched").into_response()
}
