use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::models::payment::VerifyPaymentRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

pub async fn create_order(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let order = state.payments.create_order(event_id, &user).await?;
    Ok(created(order, "Order created").into_response())
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Response, AppError> {
    let pass = state.payments.verify_payment(request, &user).await?;
    Ok(success(pass, "Payment verified, pass issued").into_response())
}
