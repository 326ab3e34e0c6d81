//! Services Layer
//!
//! Use-case orchestrators, one per entity kind. They turn requests into
//! entity lifecycle calls on a repository unit of work and project stored
//! entities back into responses.

pub mod analysis_service;
pub mod avaliacao_service;
pub mod habilidade_service;
pub mod possui_service;
pub mod startup_service;
pub mod usuario_service;

pub use analysis_service::*;
pub use avaliacao_service::*;
pub use habilidade_service::*;
pub use possui_service::*;
pub use startup_service::*;
pub use usuario_service::*;

use crate::domain::{Committed, DomainError};

/// Offset and length of a 1-based page. Page 0 is treated as page 1.
pub fn page_window(page: u64, page_size: u64) -> (usize, usize) {
    let skip = page.max(1).saturating_sub(1).saturating_mul(page_size);
    (
        usize::try_from(skip).unwrap_or(usize::MAX),
        usize::try_from(page_size).unwrap_or(usize::MAX),
    )
}

pub(crate) fn paginate<T>(records: Vec<T>, page: u64, page_size: u64) -> impl Iterator<Item = T> {
    let (skip, take) = page_window(page, page_size);
    records.into_iter().skip(skip).take(take)
}

pub(crate) fn first_inserted<T>(committed: Committed<T>) -> Result<T, DomainError> {
    committed
        .inserted
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Internal("insert returned no record".to_string()))
}

/// A row that vanished between fetch and commit reads as "not found".
pub(crate) fn found<T>(result: Result<T, DomainError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DomainError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_window(1, 10), (0, 10));
        assert_eq!(page_window(3, 10), (20, 10));
    }

    #[test]
    fn page_zero_clamps_to_first_page() {
        assert_eq!(page_window(0, 10), (0, 10));
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let (skip, take) = page_window(u64::MAX, u64::MAX);
        assert_eq!(skip, usize::try_from(u64::MAX).unwrap_or(usize::MAX));
        assert_eq!(take, usize::try_from(u64::MAX).unwrap_or(usize::MAX));
    }

    #[test]
    fn paginate_takes_the_requested_slice() {
        let records: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(records.clone(), 1, 10).count(), 10);
        assert_eq!(paginate(records.clone(), 3, 10).collect::<Vec<_>>(), vec![21, 22, 23, 24, 25]);
        assert_eq!(paginate(records, 1, 0).count(), 0);
    }
}
