//! Verified identity configuration.
//!
//! Token issuance and verification happen upstream; EventHub only reads the
//! identity the authentication layer has already verified.

use serde::{Deserialize, Serialize};

/// Where to find the verified user identity on inbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the verified user id (a UUID).
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_header: default_identity_header(),
        }
    }
}

fn default_identity_header() -> String {
    "x-user-id".to_string()
}
