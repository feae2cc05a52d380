pub mod curation;
pub mod event_lifecycle;
pub mod gateway;
pub mod notifier;
pub mod payment;
pub mod registration;
pub mod side_effects;
pub mod signature;
pub mod team;

pub use curation::CurationService;
pub use event_lifecycle::EventLifecycleService;
pub use gateway::{GatewayOrder, OrderGateway, RazorpayGateway};
pub use notifier::{NotificationHub, SocketEvent};
pub use payment::PaymentService;
pub use registration::RegistrationService;
pub use team::TeamService;
