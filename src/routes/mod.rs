use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::auth::guards;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{admin, events, health_check, organiser_auth, payments, teams, users};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    // End-user audience: Firebase bearer token.
    let user_public = Router::new().route("/users/firebase", post(users::firebase_exchange));

    let user_protected = Router::new()
        .route(
            "/users/profile",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/users/events", get(users::list_events))
        .route("/users/events/:event_id", get(users::get_event))
        .route("/users/join-event/:event_id", post(users::join_event))
        .route("/users/my-events", get(users::my_events))
        .route("/users/passes", get(users::my_passes))
        .route("/users/notifications", get(users::my_notifications))
        .route("/payments/order/:event_id", post(payments::create_order))
        .route("/payments/verify", post(payments::verify_payment))
        .route("/teams/search", get(teams::search_users))
        .route("/teams/create", post(teams::create_team))
        .route("/teams/invites", get(teams::get_invites))
        .route("/teams/:team_id/respond", post(teams::respond_to_invite))
        .route_layer(from_fn_with_state(state.clone(), guards::require_user));

    // Organiser audience: JWT in the organiser_token cookie.
    let organiser_public = Router::new()
        .route("/api/organiser/auth/register", post(organiser_auth::register))
        .route("/api/organiser/auth/login", post(organiser_auth::login))
        .route("/api/organiser/auth/logout", post(organiser_auth::logout));

    let organiser_protected = Router::new()
        .route("/api/organiser/auth/me", get(organiser_auth::me))
        .route(
            "/api/event",
            post(events::create_event).get(events::list_my_events),
        )
        .route(
            "/api/event/:event_id",
            get(events::get_my_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/event/:event_id/status", patch(events::change_status))
        .route(
            "/api/event/:event_id/announcements",
            post(events::post_announcement).get(events::list_announcements),
        )
        .route_layer(from_fn_with_state(state.clone(), guards::require_organiser));

    // Admin audience: JWT in the adminToken cookie.
    let admin_public = Router::new()
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout));

    let admin_protected = Router::new()
        .route("/api/admin/me", get(admin::me))
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/organisers", get(admin::list_organisers))
        .route(
            "/api/admin/organisers/:organiser_id/status",
            patch(admin::set_organiser_status),
        )
        .route(
            "/api/admin/organisers/:organiser_id/verify",
            patch(admin::verify_organiser),
        )
        .route(
            "/api/admin/top-events",
            get(admin::list_top_events).post(admin::set_top_event),
        )
        .route(
            "/api/admin/top-events/:event_id",
            delete(admin::remove_top_event),
        )
        .route_layer(from_fn_with_state(state.clone(), guards::require_admin));

    Router::new()
        .route("/health", get(health_check))
        .merge(user_public)
        .merge(user_protected)
        .merge(organiser_public)
        .merge(organiser_protected)
        .merge(admin_public)
        .merge(admin_protected)
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(state)
}
