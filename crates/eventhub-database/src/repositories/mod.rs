//! PostgreSQL repositories.

pub mod event;
pub mod registration;

pub use event::EventRepository;
pub use registration::RegistrationRepository;
