//! Web boundary: router, request state, session middleware and handlers.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use chrono::TimeDelta;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{IdentityResolver, TokenCodec};
use crate::config::AuthConfig;
use crate::store::{LoginLog, ShipmentStore, UserStore};

pub mod account;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod pages;
pub mod shipments;
pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub shipments: Arc<dyn ShipmentStore>,
    pub logins: Arc<dyn LoginLog>,
    pub codec: Arc<TokenCodec>,
    pub resolver: Arc<IdentityResolver>,
    pub token_ttl: TimeDelta,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, auth: &AuthConfig) -> Self
    where
        S: UserStore + ShipmentStore + LoginLog + 'static,
    {
        let codec = Arc::new(TokenCodec::from_config(auth));
        let users: Arc<dyn UserStore> = store.clone();
        Self {
            resolver: Arc::new(IdentityResolver::new(codec.clone(), users.clone())),
            users,
            shipments: store.clone(),
            logins: store,
            codec,
            token_ttl: auth.token_ttl,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/Manageusers", get(users::manage_users))
        .route(
            "/edit_user/{id}",
            get(users::edit_user_form).post(users::update_user),
        )
        .route("/delete_user/{id}", post(users::delete_user))
        .route_layer(middleware::from_fn(mw_auth::mw_require_admin));

    let shipment_routes = Router::new()
        .route(
            "/create-shipment",
            get(shipments::create_form).post(shipments::create),
        )
        .route("/allshipment", get(shipments::all))
        .route(
            "/editshipment/{id}",
            get(shipments::edit_form).post(shipments::update),
        )
        .route("/deleteshipments", post(shipments::delete_selected))
        .route_layer(middleware::from_fn(mw_auth::mw_require_auth));

    Router::new()
        .merge(admin_routes)
        .merge(shipment_routes)
        .route("/", get(account::root))
        .route("/login", get(account::login_page).post(account::login))
        .route("/signup", get(account::signup_page).post(account::signup))
        .route("/logout", get(account::logout))
        .route("/dashboard", get(account::dashboard))
        .route("/admin-dashboard", get(account::admin_dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ctx::mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
