//! Process-wide configuration, read once at startup and injected into the
//! components that need it.

use std::fmt::Display;

use chrono::TimeDelta;
use jsonwebtoken::Algorithm;

/// Signing configuration for session tokens.
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub token_ttl: TimeDelta,
}

pub struct AppConfig {
    pub auth: AuthConfig,
    pub database_url: String,
}

fn get_env_variable(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let algorithm = get_env_variable("JWT_ALGORITHM")
            .parse()
            .expect("Unsupported JWT_ALGORITHM");
        let ttl_minutes: i64 = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| String::from("15"))
            .parse()
            .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer");
        Self {
            secret: get_env_variable("JWT_SECRET_KEY"),
            algorithm,
            token_ttl: TimeDelta::minutes(ttl_minutes),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            auth: AuthConfig::from_env(),
            database_url: get_env_variable("DATABASE_URL"),
        }
    }
}

impl Display for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
