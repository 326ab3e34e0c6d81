//! Transport boundary
//!
//! Routing lives with the host application; this module only fixes how
//! domain failures surface over HTTP.

pub mod error;

pub use error::ApiError;
