//! Domain models for Saahaz.
//!
//! These are the core types shared across all crates.

pub mod category;
pub mod identity;
pub mod order;
pub mod product;
pub mod session;
pub mod user;
