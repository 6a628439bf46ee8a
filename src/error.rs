//! Main Crate Error

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    JWT(#[from] jsonwebtoken::errors::Error),

    #[error("PasswordHash {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /* Session / authorization errors */
    #[error(transparent)]
    Auth(#[from] crate::auth::AuthError),

    /* Login errors */
    #[error("Wrong Credentials")]
    WrongCredentials,
    #[error("Missing Credentials")]
    MissingCredentials,

    /* Record store errors */
    #[error("Email already registered")]
    EmailTaken,
    #[error("Record not found")]
    RecordNotFound,

    #[error("Context Missing")]
    CtxMissing,
}
