//! Domain layer - Pure business abstractions
//!
//! Trait definitions and domain error types. The only framework types that
//! appear here are the SeaORM/sqlx errors converted into `DomainError`.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
