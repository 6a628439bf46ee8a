#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use chrono::TimeDelta;
use jsonwebtoken::Algorithm;
use shiptrack::config::AuthConfig;
use shiptrack::store::memory::MemoryStore;
use shiptrack::web::{self, AppState};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret: String::from(TEST_SECRET),
        algorithm: Algorithm::HS256,
        token_ttl: TimeDelta::minutes(15),
    }
}

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), &test_auth_config());
    (web::router(state), store)
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, format!("access_token={cookie}"));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, format!("access_token={cookie}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap())
        .await
}

pub fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("expected a Location header")
        .to_str()
        .unwrap()
}

/// The freshly issued session token, if the response set one.
pub fn session_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .find_map(|value| {
            let token = value.to_str().ok()?.strip_prefix("access_token=")?;
            let token = token.split(';').next()?;
            (!token.is_empty()).then(|| String::from(token))
        })
}

/// Whether the response told the client to drop the session cookie.
pub fn session_cleared(response: &axum::response::Response) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|value| {
            value
                .to_str()
                .map(|value| value.starts_with("access_token=;"))
                .unwrap_or(false)
        })
}

pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn signup(app: &Router, name: &str, email: &str, password: &str, role: &str) {
    let body = format!(
        "fullname={name}&email={email}&password={password}&confirm_password={password}&role={role}"
    );
    let response = post_form(app, "/signup", &body, None).await;
    assert_eq!(
        location(&response),
        "/login?message=Account+created+successfully"
    );
}

pub async fn login(app: &Router, email: &str, password: &str) -> axum::response::Response {
    let body = format!("username={email}&password={password}");
    post_form(app, "/login", &body, None).await
}

/// Logs in and returns the issued session token.
pub async fn login_cookie(app: &Router, email: &str, password: &str) -> String {
    let response = login(app, email, password).await;
    session_cookie(&response).expect("login should set a session cookie")
}
