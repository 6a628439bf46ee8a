//! Authentication and session-authorization core: password hashing, signed
//! session tokens and per-request identity resolution.

use serde::{Deserialize, Serialize};

pub mod password;
pub mod session;
pub mod token;

pub use session::{AuthError, Identity, IdentityResolver};
pub use token::{SessionClaims, TokenCodec};

/// Access level stored on a user record and embedded in session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Unknown role names coerce to `User`.
impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
