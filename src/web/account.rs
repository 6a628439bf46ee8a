//! Signup, login, logout and dashboard handlers.

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

use super::AppState;
use super::ctx::{
    AdminUser, CurrentUser, MaybeUser, SESSION_COOKIE, clear_session, establish_session,
};
use super::pages;
use crate::auth::{Role, password::hash_password, session::authenticate};
use crate::prelude::*;
use crate::store::NewUser;

/// Entry point: anyone with a resolvable session goes straight to their
/// dashboard, everyone else (including broken sessions) to the login form.
pub async fn root(MaybeUser(user): MaybeUser) -> Redirect {
    match user {
        Some(user) if user.role.is_admin() => Redirect::to("/admin-dashboard"),
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

#[derive(Debug, Deserialize)]
pub struct Notice {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[axum::debug_handler]
pub async fn login_page(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(notice): Query<Notice>,
) -> Response {
    // An unexpired session skips the form entirely.
    if let Some(cookie) = cookies.get(SESSION_COOKIE)
        && let Ok(claims) = state.codec.decode(cookie.value())
    {
        let target = match claims.role {
            Some(Role::Admin) => "/admin-dashboard",
            _ => "/dashboard",
        };
        return Redirect::to(target).into_response();
    }

    let page = pages::login(notice.error.as_deref(), notice.message.as_deref());
    if notice.error.is_some() || notice.message.is_some() {
        clear_session(&cookies);
    }
    Html(page).into_response()
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    match authenticate(state.users.as_ref(), &form.username, &form.password) {
        Ok(user) => {
            establish_session(&state, &cookies, &user)?;
            state.logins.record(&form.username, true)?;
            tracing::info!(email = %form.username, "login succeeded");
            Ok(Redirect::to(if user.role.is_admin() {
                "/admin-dashboard"
            } else {
                "/dashboard"
            }))
        }
        Err(Error::WrongCredentials | Error::MissingCredentials) => {
            state.logins.record(&form.username, false)?;
            tracing::info!(email = %form.username, "login failed");
            Ok(Redirect::to("/login?error=Invalid+credentials"))
        }
        Err(err) => Err(err),
    }
}

pub async fn signup_page(Query(notice): Query<Notice>) -> Html<String> {
    Html(pages::signup(notice.error.as_deref()))
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    if form.password != form.confirm_password {
        return Ok(Redirect::to("/signup?error=Passwords+do+not+match."));
    }

    let user = NewUser {
        name: form.fullname,
        email: form.email,
        password_hash: hash_password(&form.password)?,
        role: Role::from(form.role.as_str()),
    };
    match state.users.insert(user) {
        Ok(_) => Ok(Redirect::to("/login?message=Account+created+successfully")),
        Err(Error::EmailTaken) => Ok(Redirect::to("/signup?error=Email+already+registered.")),
        Err(err) => Err(err),
    }
}

pub async fn logout(cookies: Cookies) -> Redirect {
    clear_session(&cookies);
    Redirect::to("/login?message=Logged+out+successfully")
}

#[axum::debug_handler]
pub async fn dashboard(
    CurrentUser(user): CurrentUser,
    Query(notice): Query<Notice>,
) -> Response {
    if user.role.is_admin() {
        return Redirect::to("/admin-dashboard").into_response();
    }
    Html(pages::dashboard(&user.name, notice.message.as_deref())).into_response()
}

pub async fn admin_dashboard(AdminUser(user): AdminUser) -> Html<String> {
    Html(pages::admin_dashboard(&user.name))
}
