//! Saahaz Server: axum HTTP API over the auth, catalog and order
//! services.

pub mod config;
pub mod cookies;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use saahaz_auth::{AuthService, HttpIdentityVerifier, IdentityResolver};
use saahaz_db::repository::{
    SurrealCategoryRepository, SurrealOrderRepository, SurrealProductRepository,
    SurrealSessionRepository, SurrealUserRepository,
};
use saahaz_shop::{CatalogService, OrderService};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::{auth, catalog, orders, profile, users};

pub type Auth = AuthService<
    SurrealUserRepository<Any>,
    SurrealSessionRepository<Any>,
    HttpIdentityVerifier,
>;
pub type Resolver = IdentityResolver<SurrealUserRepository<Any>, SurrealSessionRepository<Any>>;
pub type Catalog = CatalogService<SurrealCategoryRepository<Any>, SurrealProductRepository<Any>>;
pub type Orders = OrderService<SurrealOrderRepository<Any>, SurrealProductRepository<Any>>;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Auth>,
    pub resolver: Arc<Resolver>,
    pub catalog: Arc<Catalog>,
    pub orders: Arc<Orders>,
}

impl AppState {
    /// Wire every service onto one database handle.
    pub fn new(db: Surreal<Any>, config: &ServerConfig) -> Self {
        let verifier = HttpIdentityVerifier::from_config(&config.auth);

        Self {
            auth: Arc::new(AuthService::new(
                SurrealUserRepository::new(db.clone()),
                SurrealSessionRepository::new(db.clone()),
                verifier,
                config.auth.clone(),
            )),
            resolver: Arc::new(IdentityResolver::new(
                SurrealUserRepository::new(db.clone()),
                SurrealSessionRepository::new(db.clone()),
                config.auth.clone(),
            )),
            catalog: Arc::new(CatalogService::new(
                SurrealCategoryRepository::new(db.clone()),
                SurrealProductRepository::new(db.clone()),
            )),
            orders: Arc::new(OrderService::new(
                SurrealOrderRepository::new(db.clone()),
                SurrealProductRepository::new(db),
                config.pricing,
            )),
        }
    }
}

/// Builds the axum router with all routes under `/api`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(handlers::root))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/google/session-data", post(auth::session_data))
        .route("/auth/logout", post(auth::logout))
        // Profile & roles
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/users/{id}/role", put(users::set_role))
        // Catalog
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{id}",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route(
            "/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/products/{id}",
            get(catalog::get_product)
                .put(catalog::update_product)
                .delete(catalog::delete_product),
        )
        // Orders
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", put(orders::update_status));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
