//! Admin user-management handlers.

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use super::pages;
use crate::auth::Role;
use crate::prelude::*;

pub async fn manage_users(State(state): State<AppState>) -> Result<Html<String>> {
    let users = state.users.all()?;
    Ok(Html(pages::manage_users(&users)))
}

pub async fn edit_user_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    Ok(match state.users.find_by_id(id)? {
        Some(user) => Html(pages::edit_user(&user)).into_response(),
        None => Redirect::to("/Manageusers").into_response(),
    })
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<EditUserForm>,
) -> Result<Redirect> {
    let role = Role::from(form.role.as_str());
    match state.users.update(id, &form.name, &form.email, role) {
        Ok(()) | Err(Error::EmailTaken) => Ok(Redirect::to("/Manageusers")),
        Err(err) => Err(err),
    }
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Redirect> {
    state.users.delete(id)?;
    Ok(Redirect::to("/Manageusers"))
}
