//! # eventhub-core
//!
//! Core crate for EventHub. Contains the seat ledger trait, configuration
//! schemas, typed identifiers and the unified error system.
//!
//! This crate has **no** internal dependencies on other EventHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, CancelError, CapacityError, ErrorKind, RegisterError};
pub use result::AppResult;
