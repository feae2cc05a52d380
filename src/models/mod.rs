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
