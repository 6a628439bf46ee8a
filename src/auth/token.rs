//! Signed session tokens.
//!
//! A [`TokenCodec`] is a pure function of its construction-time secret and
//! algorithm; the same process never rotates either. Decoding collapses bad
//! signatures, malformed tokens and elapsed expiries into one untrusted-token
//! outcome so callers cannot branch on why verification failed.

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{Role, session::AuthError};
use crate::config::AuthConfig;
use crate::prelude::*;

/// Claims carried inside a session token.
///
/// `sub` and `role` are optional so that a token whose signature verifies but
/// which lacks a required claim stays observable as a distinct state; `exp`
/// is always stamped at encode time and enforced at decode time.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub exp: i64,
}

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    default_ttl: TimeDelta,
}

impl TokenCodec {
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: TimeDelta) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.secret.as_bytes(), config.algorithm, config.token_ttl)
    }

    pub fn default_ttl(&self) -> TimeDelta {
        self.default_ttl
    }

    /// Signs a token for `subject`, expiring `ttl` from now. `None` uses the
    /// configured default.
    pub fn encode(&self, subject: &str, role: Role, ttl: Option<TimeDelta>) -> Result<String> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expiration = chrono::Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::Generic(String::from("Token expiry out of range")))?;

        let claims = SessionClaims {
            sub: Some(String::from(subject)),
            role: Some(role),
            exp: expiration.timestamp(),
        };
        Ok(encode(&Header::new(self.algorithm), &claims, &self.encoding)?)
    }

    /// Verifies and decodes a token.
    pub fn decode(&self, token: &str) -> std::result::Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::new(self.algorithm))
            .map(|data| data.claims)
            .map_err(|err| {
                log::debug!("Rejected session token: {err}");
                AuthError::SessionInvalid
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"unit-test-secret", Algorithm::HS256, TimeDelta::minutes(15))
    }

    #[test]
    fn encode_then_decode_returns_claims() {
        let codec = codec();
        let token = codec.encode("a@x.com", Role::User, None).unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("a@x.com"));
        assert_eq!(claims.role, Some(Role::User));
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let token = codec
            .encode("a@x.com", Role::User, Some(TimeDelta::minutes(-5)))
            .unwrap();
        assert_eq!(codec.decode(&token), Err(AuthError::SessionInvalid));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.encode("a@x.com", Role::User, None).unwrap();

        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let payload = &mut parts[1];
        let flipped = if payload.starts_with('A') { "B" } else { "A" };
        payload.replace_range(0..1, flipped);
        let tampered = parts.join(".");

        assert_eq!(codec.decode(&tampered), Err(AuthError::SessionInvalid));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let other = TokenCodec::new(b"other-secret", Algorithm::HS256, TimeDelta::minutes(15));
        let token = other.encode("a@x.com", Role::Admin, None).unwrap();
        assert_eq!(codec().decode(&token), Err(AuthError::SessionInvalid));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(codec().decode("not.a.token"), Err(AuthError::SessionInvalid));
    }

    #[test]
    fn missing_claims_still_decode_when_signed() {
        // A token signed with our secret but carrying only `exp`: the codec
        // accepts it, presence of sub/role is the resolver's check.
        #[derive(Serialize)]
        struct BareClaims {
            exp: i64,
        }
        let bare = BareClaims {
            exp: (chrono::Utc::now() + TimeDelta::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &bare,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        let claims = codec().decode(&token).unwrap();
        assert!(claims.sub.is_none());
        assert!(claims.role.is_none());
    }
}
