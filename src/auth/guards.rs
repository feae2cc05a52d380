use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::cookies::{extract_cookie, ADMIN_COOKIE, ORGANISER_COOKIE};
use crate::auth::jwt::{decode_token, SessionRole};
use crate::models::admin::Admin;
use crate::models::organiser::Organiser;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::error::AppError;

/// Request-scoped end-user identity, inserted by `require_user`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Request-scoped organiser identity, inserted by `require_organiser`.
#[derive(Debug, Clone)]
pub struct AuthOrganiser(pub Organiser);

/// Request-scoped admin identity, inserted by `require_admin`.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Admin);

/// End-user guard: Firebase ID token in the Authorization header,
/// verified through the token-verifier seam, resolved to a profile row.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::AuthError("Missing authentication token".to_string()))?;

    let identity = state.verifier.verify(&token).await?;

    let user = state
        .users
        .find_by_firebase_uid(&identity.uid)
        .await?
        .ok_or_else(|| AppError::AuthError("Account not registered".to_string()))?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Organiser guard: JWT in the `organiser_token` cookie. A deactivated
/// account fails here even with a valid session.
pub async fn require_organiser(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_cookie(request.headers(), ORGANISER_COOKIE)
        .ok_or_else(|| AppError::AuthError("Not logged in".to_string()))?;

    let claims = decode_token(&state.config.jwt_secret, &token, SessionRole::Organiser)?;

    let organiser = state
        .organisers
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::AuthError("Account not found".to_string()))?;

    if !organiser.is_active {
        return Err(AppError::AuthError("Account disabled".to_string()));
    }

    request.extensions_mut().insert(AuthOrganiser(organiser));
    Ok(next.run(request).await)
}

/// Admin guard: JWT in the `adminToken` cookie.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_cookie(request.headers(), ADMIN_COOKIE)
        .ok_or_else(|| AppError::AuthError("Not logged in".to_string()))?;

    let claims = decode_token(&state.config.jwt_secret, &token, SessionRole::Admin)?;

    let admin = state
        .admins
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::AuthError("Account not found".to_string()))?;

    request.extensions_mut().insert(AuthAdmin(admin));
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}
