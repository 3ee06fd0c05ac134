use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    error::{Error, Result},
    models::admin::Admin,
    utils::jwt,
    AppState,
};

pub const SESSION_COOKIE: &str = "token";

/// Session cookie first, `Authorization: Bearer` header as the fallback for
/// legacy clients.
fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

async fn authenticate(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> Result<Admin> {
    let token = extract_token(jar, headers)
        .ok_or_else(|| Error::Unauthorized("Not authorized, no token".to_string()))?;

    let config = crate::config::get_config();
    let claims = jwt::verify_token(&token, &config.jwt_secret)?;

    let admin = state
        .admin_service
        .find_by_id(claims.admin_id()?)
        .await?
        .ok_or_else(|| Error::Unauthorized("Not authorized, admin not found".to_string()))?;

    if !admin.is_active {
        return Err(Error::Unauthorized(
            "Not authorized, admin account is inactive".to_string(),
        ));
    }

    Ok(admin)
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let admin = authenticate(&state, &jar, req.headers()).await?;
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}

pub async fn require_superadmin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let admin = authenticate(&state, &jar, req.headers()).await?;
    if !admin.role.can_manage_admins() {
        return Err(Error::Forbidden(
            "Access denied. Required roles: superadmin".to_string(),
        ));
    }
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}
