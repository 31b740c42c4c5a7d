//! Seat registration and cancellation.

pub mod service;

pub use service::RegistrationService;
