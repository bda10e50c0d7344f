//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie carrying the external session token.
pub const SESSION_COOKIE: &str = "session_token";

/// HttpOnly, Secure, cross-site session cookie.
pub fn session_cookie(token: &str, max_age_secs: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(Duration::seconds(max_age_secs as i64))
        .build()
}

/// Expired cookie that clears the session on the client.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, String::new()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
