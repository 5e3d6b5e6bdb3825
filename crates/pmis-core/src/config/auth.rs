//! Login configuration.

use serde::{Deserialize, Serialize};

/// Role lookup settings. There is no credential verification; a login is a
/// lookup of the username in the seeded user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Whether usernames missing from the directory may log in as guests.
    #[serde(default)]
    pub allow_guest: bool,
    /// Role assigned to guest logins (`"viewer"`, `"engineer"`, ...).
    #[serde(default = "default_guest_role")]
    pub guest_role: String,
    /// Username used by the CLI when `--user` is not given.
    #[serde(default = "default_user")]
    pub default_user: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_guest: false,
            guest_role: default_guest_role(),
            default_user: default_user(),
        }
    }
}

fn default_guest_role() -> String {
    "viewer".to_string()
}

fn default_user() -> String {
    "admin".to_string()
}
