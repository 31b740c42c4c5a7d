//! Core traits defined in `eventhub-core` and implemented by other crates.

pub mod ledger;

pub use ledger::CapacityLedger;
