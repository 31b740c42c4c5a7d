//! Registration domain entities.

pub mod model;
pub mod state;

pub use model::{Registration, RegistrationDetail};
pub use state::RegistrationState;
