//! Store-backed flow tests for registration, payment and event
//! updates. Each test gets its own database provisioned by sqlx from
//! DATABASE_URL, with migrations applied.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use eventrix_server::models::event::UpdateEventRequest;
use eventrix_server::models::organiser::Organiser;
use eventrix_server::models::payment::VerifyPaymentRequest;
use eventrix_server::models::user::User;
use eventrix_server::repositories::{
    AnnouncementRepository, EventRepository, OrganiserRepository, ParticipationRepository,
    PassRepository, PaymentRepository,
};
use eventrix_server::services::gateway::{GatewayOrder, OrderGateway};
use eventrix_server::services::signature::compute_signature;
use eventrix_server::services::{EventLifecycleService, PaymentService, RegistrationService};
use eventrix_server::utils::error::AppError;

const KEY_SECRET: &str = "test-key-secret";

/// Deterministic gateway: order id derived from the receipt, no
/// network.
struct StubGateway;

#[async_trait]
impl OrderGateway for StubGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, AppError> {
        Ok(GatewayOrder {
            order_id: format!("order_{receipt}"),
            amount,
            currency: currency.to_string(),
        })
    }
}

async fn seed_user(pool: &PgPool, tag: &str) -> User {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (firebase_uid, name, email) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(format!("uid-{tag}"))
    .bind(format!("User {tag}"))
    .bind(format!("{tag}@example.com"))
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_organiser(pool: &PgPool) -> Organiser {
    sqlx::query_as::<_, Organiser>(
        "INSERT INTO organisers (name, email, password_hash) VALUES ('Org', 'org@example.com', 'x') RETURNING *",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Published solo event, deadline 20 days out, event date 30 days out.
async fn seed_event(
    pool: &PgPool,
    organiser_id: Uuid,
    capacity: i32,
    is_paid: bool,
    price: &str,
) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO events (organiser_id, title, banner_url, event_date,
                            registration_deadline, participation_type, total_capacity,
                            is_paid, price, mode, location_name, status)
        VALUES ($1, 'Hack Night', 'https://cdn.example/banner.png',
                now() + interval '30 days', now() + interval '20 days',
                'solo', $2, $3, $4, 'online', 'Online Event', 'published')
        RETURNING id
        "#,
    )
    .bind(organiser_id)
    .bind(capacity)
    .bind(is_paid)
    .bind(Decimal::from_str_exact(price).unwrap())
    .fetch_one(pool)
    .await
    .unwrap()
}

fn registration(pool: &PgPool) -> RegistrationService {
    RegistrationService::new(
        EventRepository::new(pool.clone()),
        ParticipationRepository::new(pool.clone()),
    )
}

fn payments(pool: &PgPool) -> PaymentService {
    PaymentService::new(
        EventRepository::new(pool.clone()),
        PaymentRepository::new(pool.clone()),
        ParticipationRepository::new(pool.clone()),
        PassRepository::new(pool.clone()),
        Arc::new(StubGateway),
        "rzp_test_key".to_string(),
        KEY_SECRET.to_string(),
    )
}

fn lifecycle(pool: &PgPool) -> EventLifecycleService {
    EventLifecycleService::new(
        EventRepository::new(pool.clone()),
        OrganiserRepository::new(pool.clone()),
        AnnouncementRepository::new(pool.clone()),
    )
}

async fn sold_seats(pool: &PgPool, event_id: Uuid) -> i32 {
    sqlx::query_scalar("SELECT sold_seats FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn pass_count(pool: &PgPool, event_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM event_passes WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn blank_update() -> UpdateEventRequest {
    UpdateEventRequest {
        title: None,
        description: None,
        banner_url: None,
        event_date: None,
        event_start: None,
        event_end: None,
        registration_deadline: None,
        total_capacity: None,
    }
}

#[sqlx::test]
async fn join_rejects_when_capacity_exhausted(pool: PgPool) {
    let organiser = seed_organiser(&pool).await;
    let event_id = seed_event(&pool, organiser.id, 1, false, "0").await;
    let service = registration(&pool);

    let first = seed_user(&pool, "a").await;
    service.join_event(event_id, &first).await.unwrap();

    let second = seed_user(&pool, "b").await;
    let err = service.join_event(event_id, &second).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(msg) if msg == "Event is full"));
    assert_eq!(sold_seats(&pool, event_id).await, 1);
}

#[sqlx::test]
async fn rejoin_on_full_event_reports_conflict(pool: PgPool) {
    let organiser = seed_organiser(&pool).await;
    let event_id = seed_event(&pool, organiser.id, 1, false, "0").await;
    let service = registration(&pool);

    let user = seed_user(&pool, "a").await;
    service.join_event(event_id, &user).await.unwrap();

    // The event is now full, but a repeat join by the same user must
    // still read as already-joined, not as a capacity failure.
    let err = service.join_event(event_id, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(sold_seats(&pool, event_id).await, 1);
}

#[sqlx::test]
async fn duplicate_join_never_inflates_seat_count(pool: PgPool) {
    let organiser = seed_organiser(&pool).await;
    let event_id = seed_event(&pool, organiser.id, 5, false, "0").await;
    let service = registration(&pool);

    let user = seed_user(&pool, "a").await;
    service.join_event(event_id, &user).await.unwrap();

    let err = service.join_event(event_id, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(sold_seats(&pool, event_id).await, 1);
    let rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM event_participations WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test]
async fn verify_payment_issues_exactly_one_pass(pool: PgPool) {
    let organiser = seed_organiser(&pool).await;
    let event_id = seed_event(&pool, organiser.id, 100, true, "499.00").await;
    let user = seed_user(&pool, "payer").await;
    let service = payments(&pool);

    let order = service.create_order(event_id, &user).await.unwrap();
    assert_eq!(order.amount, 49900);

    let request = VerifyPaymentRequest {
        razorpay_order_id: order.order_id.clone(),
        razorpay_payment_id: "pay_123".to_string(),
        razorpay_signature: compute_signature(&order.order_id, "pay_123", KEY_SECRET),
        event_id,
    };
    let pass = service.verify_payment(request, &user).await.unwrap();
    assert!(pass.pass_id.starts_with("PASS-"));

    let status: String =
        sqlx::query_scalar("SELECT status FROM payments WHERE razorpay_order_id = $1")
            .bind(&order.order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "paid");

    // Replaying the same (valid) verification must not flip the row
    // again or mint a second pass.
    let replay = VerifyPaymentRequest {
        razorpay_order_id: order.order_id.clone(),
        razorpay_payment_id: "pay_123".to_string(),
        razorpay_signature: compute_signature(&order.order_id, "pay_123", KEY_SECRET),
        event_id,
    };
    let err = service.verify_payment(replay, &user).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(pass_count(&pool, event_id).await, 1);
    assert_eq!(sold_seats(&pool, event_id).await, 1);
}

#[sqlx::test]
async fn verify_payment_rejects_another_users_order(pool: PgPool) {
    let organiser = seed_organiser(&pool).await;
    let event_id = seed_event(&pool, organiser.id, 100, true, "499.00").await;
    let payer = seed_user(&pool, "payer").await;
    let intruder = seed_user(&pool, "intruder").await;
    let service = payments(&pool);

    let order = service.create_order(event_id, &payer).await.unwrap();

    let request = VerifyPaymentRequest {
        razorpay_order_id: order.order_id.clone(),
        razorpay_payment_id: "pay_123".to_string(),
        razorpay_signature: compute_signature(&order.order_id, "pay_123", KEY_SECRET),
        event_id,
    };
    let err = service.verify_payment(request, &intruder).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(pass_count(&pool, event_id).await, 0);
    let status: String =
        sqlx::query_scalar("SELECT status FROM payments WHERE razorpay_order_id = $1")
            .bind(&order.order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "created");
}

#[sqlx::test]
async fn update_cannot_move_deadline_past_event_date(pool: PgPool) {
    let organiser = seed_organiser(&pool).await;
    let event_id = seed_event(&pool, organiser.id, 100, false, "0").await;
    let service = lifecycle(&pool);

    // Deadline alone, landing past the stored event date (30 days out).
    let mut request = blank_update();
    request.registration_deadline = Some(Utc::now() + Duration::days(40));
    let err = service
        .update_event(event_id, &organiser, request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // Event date alone, pulled before the stored deadline (20 days out).
    let mut request = blank_update();
    request.event_date = Some(Utc::now() + Duration::days(10));
    let err = service
        .update_event(event_id, &organiser, request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // Moving both together, in order, is fine.
    let mut request = blank_update();
    request.event_date = Some(Utc::now() + Duration::days(60));
    request.registration_deadline = Some(Utc::now() + Duration::days(50));
    let updated = service
        .update_event(event_id, &organiser, request)
        .await
        .unwrap();
    assert_eq!(updated.id, event_id);
}
