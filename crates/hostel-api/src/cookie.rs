//! Session carrier: the `auth_token` cookie and the bearer header.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;

use hostel_auth::IssuedToken;
use hostel_core::config::SessionConfig;

/// Builds the cookie that carries a freshly issued token.
pub fn session_cookie(config: &SessionConfig, issued: &IssuedToken) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), issued.token.clone()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(issued.max_age.num_seconds()))
        .build()
}

/// Builds the cookie that clears the session: empty value, zero max-age,
/// expiry in the past. Identical on every call.
pub fn cleared_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Extracts the carried token: the session cookie first, then
/// `Authorization: Bearer`.
pub fn carried_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}
