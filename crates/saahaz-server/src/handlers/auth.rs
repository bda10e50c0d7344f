//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use saahaz_auth::{AuthOutput, RegisterInput};
use saahaz_core::models::user::UserProfile;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::cookies::{self, SESSION_COOKIE};
use crate::error::ApiResult;
use crate::extract::bearer_token;
use crate::handlers::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Verified provider identity returned after a session exchange. The
/// session token itself only travels in the cookie.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub user: UserProfile,
}

/// `POST /api/auth/register`: create an account and return a bearer token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> ApiResult<Json<AuthOutput>> {
    Ok(Json(state.auth.register(body).await?))
}

/// `POST /api/auth/login`: email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<AuthOutput>> {
    Ok(Json(state.auth.login(&body.email, &body.password).await?))
}

/// `POST /api/auth/google/session-data`: exchange the provider session id
/// for a local session cookie.
pub async fn session_data(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let header = state.auth.config().session_header.as_str();
    let session_id = headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let out = state.auth.exchange_external_session(session_id).await?;

    let jar = jar.add(cookies::session_cookie(&out.session_token, out.expires_in));
    let body = SessionResponse {
        id: out.identity.id,
        email: out.identity.email,
        name: out.identity.name,
        picture: out.identity.picture,
        user: out.user,
    };
    Ok((jar, Json(body)))
}

/// `POST /api/auth/logout`: drop the session named by the cookie, or by
/// the bearer header when there is no cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| bearer_token(&headers));

    state.auth.logout(token.as_deref()).await?;

    let jar = jar.add(cookies::clear_session_cookie());
    Ok((jar, MessageResponse::new("Logged out successfully")))
}
