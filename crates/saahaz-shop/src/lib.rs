//! Saahaz Shop: catalog management, order pricing and the order
//! lifecycle.

pub mod catalog;
pub mod orders;
pub mod pricing;

pub use catalog::CatalogService;
pub use orders::OrderService;
pub use pricing::{PricedLine, PricedOrder, PricingPolicy, price_order};
