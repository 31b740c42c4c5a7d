//! HTTP request handlers.

pub mod event;
pub mod health;
pub mod registration;
