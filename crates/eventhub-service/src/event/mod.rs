//! Event catalogue: creation, lookup and seeding.

pub mod catalogue;
pub mod service;

pub use service::{EventService, SeedReport};
