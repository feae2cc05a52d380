use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::firebase::TokenVerifier;
use crate::config::Config;
use crate::repositories::{
    AdminRepository, AnnouncementRepository, EventRepository, NotificationRepository,
    OrganiserRepository, ParticipationRepository, PassRepository, PaymentRepository,
    TeamRepository, TopEventRepository, UserRepository,
};
use crate::services::{
    CurationService, EventLifecycleService, NotificationHub, OrderGateway, PaymentService,
    RegistrationService, TeamService,
};

/// Shared application state: repositories for the guards and simple
/// reads, services for the flows with business rules.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub hub: NotificationHub,
    pub users: UserRepository,
    pub organisers: OrganiserRepository,
    pub admins: AdminRepository,
    pub events: EventRepository,
    pub notifications: NotificationRepository,
    pub announcements: AnnouncementRepository,
    pub registration: RegistrationService,
    pub payments: PaymentService,
    pub teams: TeamService,
    pub lifecycle: EventLifecycleService,
    pub curation: CurationService,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: Config,
        verifier: Arc<dyn TokenVerifier>,
        gateway: Arc<dyn OrderGateway>,
    ) -> Self {
        let users = UserRepository::new(pool.clone());
        let organisers = OrganiserRepository::new(pool.clone());
        let admins = AdminRepository::new(pool.clone());
        let events = EventRepository::new(pool.clone());
        let participations = ParticipationRepository::new(pool.clone());
        let payments_repo = PaymentRepository::new(pool.clone());
        let passes = PassRepository::new(pool.clone());
        let teams_repo = TeamRepository::new(pool.clone());
        let notifications = NotificationRepository::new(pool.clone());
        let announcements = AnnouncementRepository::new(pool.clone());
        let top_events = TopEventRepository::new(pool);

        let hub = NotificationHub::new();

        let registration = RegistrationService::new(events.clone(), participations.clone());
        let payments = PaymentService::new(
            events.clone(),
            payments_repo,
            participations,
            passes,
            gateway,
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        );
        let teams = TeamService::new(
            teams_repo,
            users.clone(),
            notifications.clone(),
            hub.clone(),
        );
        let lifecycle = EventLifecycleService::new(
            events.clone(),
            organisers.clone(),
            announcements.clone(),
        );
        let curation = CurationService::new(
            events.clone(),
            organisers.clone(),
            users.clone(),
            top_events,
        );

        Self {
            config: Arc::new(config),
            verifier,
            hub,
            users,
            organisers,
            admins,
            events,
            notifications,
            announcements,
            registration,
            payments,
            teams,
            lifecycle,
            curation,
        }
    }
}
