use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::{AdminUser, CurrentUser};
use crate::prelude::*;

pub async fn mw_require_auth(
    user: Result<CurrentUser>,
    req: Request,
    next: Next,
) -> Result<Response> {
    user?;
    Ok(next.run(req).await)
}

pub async fn mw_require_admin(
    user: Result<AdminUser>,
    req: Request,
    next: Next,
) -> Result<Response> {
    user?;
    Ok(next.run(req).await)
}
