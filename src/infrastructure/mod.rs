//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection, migrations and schema check (db)
//! - Configuration loading (config)
//! - Password hashing (auth)
//! - Demo data (seed)
//! - Repository implementations (repositories)
//! - Application state (state)

pub mod auth;
pub mod config;
pub mod db;
pub mod repositories;
pub mod seed;
pub mod state;

pub use repositories::*;
pub use state::AppState;
