//! Per-request identity resolution and credential checks.

use std::sync::Arc;

use serde::Serialize;

use super::token::TokenCodec;
use super::{Role, password::verify_password};
use crate::prelude::*;
use crate::store::{UserRecord, UserStore};

/// The resolved, request-scoped view of the authenticated caller.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Session and authorization failures, each surfaced to the boundary as a
/// distinct outcome.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad signature, malformed token or elapsed expiry.
    #[error("Session expired or invalid")]
    SessionInvalid,
    /// The signature verified but a required claim is missing.
    #[error("Invalid token")]
    SessionMalformed,
    /// The session is valid but its subject no longer exists.
    #[error("User not found")]
    UserNotFound,
    /// No session where one is required.
    #[error("Authentication required")]
    AuthenticationRequired,
    /// Authenticated, but the role does not grant access.
    #[error("Admin privileges required")]
    AuthorizationDenied,
}

/// Recovers the authenticated identity behind a session cookie.
///
/// Every resolution re-reads the user record, so deleting a user ends their
/// sessions on the next request even while their tokens are still unexpired.
pub struct IdentityResolver {
    codec: Arc<TokenCodec>,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(codec: Arc<TokenCodec>, users: Arc<dyn UserStore>) -> Self {
        Self { codec, users }
    }

    /// Resolves a request's session cookie to an identity.
    ///
    /// No cookie resolves to `Ok(None)` (anonymous). A cookie that fails
    /// verification, lacks a required claim or names a missing user fails
    /// with the matching [`AuthError`]; store failures propagate as-is.
    pub fn resolve(&self, cookie: Option<&str>) -> Result<Option<Identity>> {
        let Some(token) = cookie else {
            return Ok(None);
        };

        let claims = self.codec.decode(token)?;
        let (Some(email), Some(_token_role)) = (claims.sub, claims.role) else {
            return Err(AuthError::SessionMalformed.into());
        };

        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(AuthError::UserNotFound)?;

        // The token's role only witnesses what was issued; the record is
        // authoritative, so server-side role changes apply on the next
        // request instead of at token expiry.
        Ok(Some(Identity {
            email: user.email,
            name: user.name,
            role: user.role,
        }))
    }
}

/// Checks submitted login credentials against the stored record.
///
/// An unknown email and a wrong password are indistinguishable to the
/// caller.
pub fn authenticate(users: &dyn UserStore, email: &str, password: &str) -> Result<UserRecord> {
    if password.is_empty() {
        return Err(Error::MissingCredentials);
    }
    let user = users.find_by_email(email)?.ok_or(Error::WrongCredentials)?;
    if !verify_password(password, &user.password_hash) {
        return Err(Error::WrongCredentials);
    }
    Ok(user)
}
