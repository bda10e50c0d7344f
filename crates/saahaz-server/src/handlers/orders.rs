//! Order handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use saahaz_core::models::order::{Order, OrderStatus, PlaceOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::CurrentIdentity;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: OrderStatus,
}

pub async fn list_orders(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders(&identity).await?))
}

/// `POST /api/orders`: totals are computed server-side.
pub async fn place_order(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(body): Json<PlaceOrder>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.place_order(&identity, body).await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(&identity, id).await?))
}

/// `PUT /api/orders/{id}/status?status=confirmed`
pub async fn update_status(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Order>> {
    Ok(Json(
        state
            .orders
            .update_order_status(&identity, id, query.status)
            .await?,
    ))
}
