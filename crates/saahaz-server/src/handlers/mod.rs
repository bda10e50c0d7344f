//! HTTP request handlers.

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod profile;
pub mod users;

use axum::Json;
use serde::Serialize;

/// Plain `{"message": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// `GET /api/` liveness probe.
pub async fn root() -> Json<MessageResponse> {
    MessageResponse::new("Saahaz API")
}
