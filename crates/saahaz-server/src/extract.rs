//! Request extractors for the caller's identity.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use saahaz_auth::Credentials;
use saahaz_core::models::identity::Identity;

use crate::AppState;
use crate::cookies::SESSION_COOKIE;
use crate::error::ApiError;

/// Value of an `Authorization: Bearer <token>` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Session cookie plus bearer header, as presented.
pub fn credentials(headers: &HeaderMap) -> Credentials {
    let jar = CookieJar::from_headers(headers);
    Credentials {
        session_token: jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty()),
        bearer_token: bearer_token(headers),
    }
}

/// Extractor that requires an authenticated caller.
///
/// Rejects with the resolver's error (401 for missing or bad
/// credentials).
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = credentials(&parts.headers);
        let identity = state.resolver.resolve(&credentials).await?;
        Ok(Self(identity))
    }
}
