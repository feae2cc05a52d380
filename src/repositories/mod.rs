pub mod admin;
pub mod announcement;
pub mod event;
pub mod notification;
pub mod organiser;
pub mod participation;
pub mod pass;
pub mod payment;
pub mod team;
pub mod top_event;
pub mod user;

pub use admin::AdminRepository;
pub use announcement::AnnouncementRepository;
pub use event::EventRepository;
pub use notification::NotificationRepository;
pub use organiser::OrganiserRepository;
pub use participation::ParticipationRepository;
pub use pass::PassRepository;
pub use payment::PaymentRepository;
pub use team::TeamRepository;
pub use top_event::TopEventRepository;
pub use user::UserRepository;
