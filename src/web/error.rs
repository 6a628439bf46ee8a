//! Maps crate errors onto transport responses.
//!
//! Session failures redirect to the login entry point with a short
//! categorical hint. `AuthorizationDenied` is the one auth outcome that must
//! not redirect: the caller is correctly authenticated, so bouncing them to
//! login would loop.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::AuthError;
use crate::prelude::*;

fn login_redirect(reason: &str) -> Response {
    let reason: String = url::form_urlencoded::byte_serialize(reason.as_bytes()).collect();
    Redirect::to(&format!("/login?error={reason}")).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Auth(AuthError::AuthenticationRequired) => {
                login_redirect("Authentication required.")
            }
            Error::Auth(AuthError::SessionInvalid) => login_redirect("Session expired or invalid."),
            Error::Auth(AuthError::SessionMalformed) => {
                login_redirect("Invalid token. Please log in.")
            }
            Error::Auth(AuthError::UserNotFound) => login_redirect("User not found."),
            Error::Auth(AuthError::AuthorizationDenied) => {
                (StatusCode::FORBIDDEN, "Admin privileges required.").into_response()
            }

            Error::WrongCredentials | Error::MissingCredentials => {
                login_redirect("Invalid credentials")
            }

            Error::RecordNotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),

            // Internal errors: log the detail, hide it from the response.
            err => {
                log::error!("Internal error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
