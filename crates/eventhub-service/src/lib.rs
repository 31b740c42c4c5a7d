//! # eventhub-service
//!
//! Business logic service layer for EventHub. Services orchestrate the
//! store handles to implement registration, cancellation and the event
//! catalogue.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod event;
pub mod registration;
pub mod retry;

pub use context::RequestContext;
pub use event::{EventService, SeedReport};
pub use registration::RegistrationService;
pub use retry::RetryPolicy;
