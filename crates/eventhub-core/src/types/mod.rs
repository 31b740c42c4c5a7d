//! Core type definitions used across the EventHub workspace.

pub mod id;
pub mod seat;

pub use id::*;
pub use seat::SeatCount;
