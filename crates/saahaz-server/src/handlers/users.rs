//! Admin user management.

use axum::Json;
use axum::extract::{Path, State};
use saahaz_core::models::user::{Role, UserProfile};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::CurrentIdentity;

#[derive(Debug, Deserialize)]
pub struct RoleGrant {
    pub role: Role,
}

/// `PUT /api/users/{id}/role`
pub async fn set_role(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    Json(body): Json<RoleGrant>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.auth.set_role(&identity, id, body.role).await?))
}
