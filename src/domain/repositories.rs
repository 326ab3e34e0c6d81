//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use std::fmt;

use async_trait::async_trait;

use super::DomainError;

/// How an entity kind gets its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Numeric key assigned by the store on insert
    Surrogate,
    /// Caller-supplied business identifier (CPF, CNPJ)
    Natural,
}

/// Maps an entity kind to its identifying attribute.
pub trait Keyed {
    type Key: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Entity name used in logs and error messages
    const NAME: &'static str;
    const KIND: KeyKind;

    fn key(&self) -> Self::Key;

    /// Whether the record carries a usable identity
    fn has_key(&self) -> bool;
}

/// Outcome of a committed unit of work
#[derive(Debug)]
pub struct Committed<T> {
    /// Inserted records, in staging order, with store-assigned keys
    pub inserted: Vec<T>,
    pub updated: Vec<T>,
    pub deleted: u64,
}

impl<T> Default for Committed<T> {
    fn default() -> Self {
        Self {
            inserted: Vec::new(),
            updated: Vec::new(),
            deleted: 0,
        }
    }
}

impl<T> Committed<T> {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.deleted == 0
    }
}

/// Generic repository over any keyed entity kind.
///
/// Mutations are staged and only reach the store on `save_changes`, which
/// applies the whole batch atomically.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Keyed + Send + Sync + 'static,
{
    /// Find a single record by its identity
    async fn find_by_id(&self, key: T::Key) -> Result<Option<T>, DomainError>;

    /// Every record of the kind, in storage order
    async fn find_all(&self) -> Result<Vec<T>, DomainError>;

    /// Stage an insert
    fn add(&self, record: T) -> Result<(), DomainError>;

    /// Stage an overwrite of the record's mutable attributes
    fn update(&self, record: T) -> Result<(), DomainError>;

    /// Stage a removal
    fn delete(&self, record: T) -> Result<(), DomainError>;

    /// Number of staged operations
    fn pending_changes(&self) -> usize;

    /// Drop staged operations without touching the store
    fn discard_changes(&self);

    /// Commit every staged operation as one transaction
    async fn save_changes(&self) -> Result<Committed<T>, DomainError>;
}

/// Bridge to the store-side "analyze startup" procedure
#[async_trait]
pub trait StartupAnalyzer: Send + Sync {
    async fn analyze(&self, cnpj: &str) -> Result<String, DomainError>;
}
