//! Session cookie resolution and the tiered identity extractors.
//!
//! A resolver middleware runs once per request, stashing the resolution
//! outcome in the request extensions; the extractors below only interpret
//! that outcome. The cookie is cleared whenever resolution fails, so a dead
//! session never outlives the response that reported it.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use super::AppState;
use crate::auth::{AuthError, Identity};
use crate::prelude::*;
use crate::store::UserRecord;

pub const SESSION_COOKIE: &str = "access_token";

type ResolvedIdentity = std::result::Result<Option<Identity>, AuthError>;

#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let resolved: ResolvedIdentity = match state.resolver.resolve(token.as_deref()) {
        Ok(identity) => Ok(identity),
        Err(Error::Auth(err)) => Err(err),
        // Store failures are not a session outcome; fail the request here.
        Err(err) => return err.into_response(),
    };

    if resolved.is_err() {
        let mut stale = Cookie::from(SESSION_COOKIE);
        stale.set_path("/");
        cookies.remove(stale);
    }
    req.extensions_mut().insert(resolved);

    next.run(req).await
}

/// Writes a fresh session cookie for `user`.
pub fn establish_session(state: &AppState, cookies: &Cookies, user: &UserRecord) -> Result<()> {
    let token = state.codec.encode(&user.email, user.role, None)?;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(tower_cookies::cookie::time::Duration::seconds(
        state.token_ttl.num_seconds(),
    ));
    cookies.add(cookie);
    Ok(())
}

pub fn clear_session(cookies: &Cookies) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);
}

/// Optional tier: the identity when the session resolved, `None` otherwise.
/// Never rejects.
pub struct MaybeUser(pub Option<Identity>);

/// Required tier: rejects anonymous requests with `AuthenticationRequired`
/// and propagates session failures.
pub struct CurrentUser(pub Identity);

/// Admin tier: authentication is checked before the role, so an anonymous
/// request fails `AuthenticationRequired`, not `AuthorizationDenied`.
pub struct AdminUser(pub Identity);

fn resolved(parts: &Parts) -> Result<&ResolvedIdentity> {
    parts
        .extensions
        .get::<ResolvedIdentity>()
        .ok_or(Error::CtxMissing)
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(Self(resolved(parts)?.clone().unwrap_or(None)))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let identity = resolved(parts)?
            .clone()?
            .ok_or(AuthError::AuthenticationRequired)?;
        Ok(Self(identity))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
        if !identity.role.is_admin() {
            return Err(AuthError::AuthorizationDenied.into());
        }
        Ok(Self(identity))
    }
}
