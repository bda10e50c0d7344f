//! Saahaz Core: domain models, repository traits and the error
//! taxonomy shared by every other crate.

pub mod error;
pub mod models;
pub mod repository;
