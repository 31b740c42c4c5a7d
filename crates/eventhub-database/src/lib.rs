//! # eventhub-database
//!
//! Store handles for EventHub: PostgreSQL connection management and
//! repositories, plus a process-local in-memory store implementing the
//! same traits.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{EventStore, RegistrationStore, StoreHandles};
