//! Profile handlers for the calling user.

use axum::Json;
use axum::extract::State;
use saahaz_core::models::user::{UpdateUser, UserProfile};

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::CurrentIdentity;

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.auth.get_profile(&identity).await?))
}

/// Only name, address and phone are writable here.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(body): Json<UpdateUser>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.auth.update_profile(&identity, body).await?))
}
