//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups that miss return
//! [`SaahazError::NotFound`](crate::error::SaahazError::NotFound).

use uuid::Uuid;

use crate::error::SaahazResult;
use crate::models::{
    category::{Category, CreateCategory, UpdateCategory},
    order::{CreateOrder, Order, OrderStatus},
    product::{CreateProduct, Product, ProductFilter, UpdateProduct},
    session::{CreateSession, Session},
    user::{CreateUser, UpdateUser, User},
};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is already taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = SaahazResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SaahazResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = SaahazResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = SaahazResult<User>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = SaahazResult<Session>> + Send;

    /// Most recent session with this token digest whose expiry is still
    /// in the future. Expired rows are treated as absent.
    fn get_active_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = SaahazResult<Session>> + Send;

    /// Delete every session with this token digest. Returns how many
    /// were removed; zero is not an error.
    fn delete_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = SaahazResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub trait CategoryRepository: Send + Sync {
    fn create(&self, input: CreateCategory)
    -> impl Future<Output = SaahazResult<Category>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SaahazResult<Category>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> impl Future<Output = SaahazResult<Category>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = SaahazResult<()>> + Send;
    fn list(&self) -> impl Future<Output = SaahazResult<Vec<Category>>> + Send;
}

pub trait ProductRepository: Send + Sync {
    fn create(&self, input: CreateProduct) -> impl Future<Output = SaahazResult<Product>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SaahazResult<Product>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> impl Future<Output = SaahazResult<Product>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = SaahazResult<()>> + Send;
    fn list(
        &self,
        filter: ProductFilter,
    ) -> impl Future<Output = SaahazResult<Vec<Product>>> + Send;
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

pub trait OrderRepository: Send + Sync {
    fn create(&self, input: CreateOrder) -> impl Future<Output = SaahazResult<Order>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SaahazResult<Order>> + Send;
    fn list_all(&self) -> impl Future<Output = SaahazResult<Vec<Order>>> + Send;
    fn list_by_user(&self, user_id: Uuid)
    -> impl Future<Output = SaahazResult<Vec<Order>>> + Send;
    /// Set the status and stamp `updated_at`. Transition rules are the
    /// caller's concern.
    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> impl Future<Output = SaahazResult<Order>> + Send;
}
