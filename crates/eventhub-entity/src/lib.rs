//! # eventhub-entity
//!
//! Domain entity models for EventHub. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod event;
pub mod registration;

pub use event::{Event, NewEvent};
pub use registration::{Registration, RegistrationDetail, RegistrationState};
