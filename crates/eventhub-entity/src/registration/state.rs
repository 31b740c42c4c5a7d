//! Per-(user, event) registration state.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single (user, event) pair.
///
/// `register` moves `Unregistered -> Registered`; `cancel` moves it back.
/// There is no intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    /// The user holds no seat on the event.
    Unregistered,
    /// The user holds exactly one seat on the event.
    Registered,
}

impl RegistrationState {
    /// State derived from whether a live record exists.
    pub fn from_exists(exists: bool) -> Self {
        if exists {
            Self::Registered
        } else {
            Self::Unregistered
        }
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Registered => "registered",
        }
    }
}

impl std::fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_exists() {
        assert_eq!(RegistrationState::from_exists(true), RegistrationState::Registered);
        assert_eq!(RegistrationState::from_exists(false), RegistrationState::Unregistered);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&RegistrationState::Registered).expect("serialize");
        assert_eq!(json, "\"registered\"");
    }
}
