//! Category and product handlers. Reads are public; writes need an
//! admin.

use axum::Json;
use axum::extract::{Path, Query, State};
use saahaz_core::models::category::{Category, CreateCategory, UpdateCategory};
use saahaz_core::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::CurrentIdentity;
use crate::handlers::MessageResponse;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.list_categories().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.catalog.get_category(id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(body): Json<CreateCategory>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.catalog.create_category(&identity, body).await?))
}

pub async fn update_category(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategory>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.catalog.update_category(&identity, id, body).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete_category(&identity, id).await?;
    Ok(MessageResponse::new("Category deleted successfully"))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// `GET /api/products?category_id=&featured=`
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog.list_products(filter).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.catalog.get_product(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(body): Json<CreateProduct>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.catalog.create_product(&identity, body).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProduct>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.catalog.update_product(&identity, id, body).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete_product(&identity, id).await?;
    Ok(MessageResponse::new("Product deleted successfully"))
}
