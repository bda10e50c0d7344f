//! SurrealDB repository implementations.

mod category;
mod order;
mod product;
mod session;
mod user;

pub use category::SurrealCategoryRepository;
pub use order::SurrealOrderRepository;
pub use product::SurrealProductRepository;
pub use session::SurrealSessionRepository;
pub use user::SurrealUserRepository;
