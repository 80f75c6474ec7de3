//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors produced by cache operations themselves.
///
/// The cache is a pure in-memory structure, so the taxonomy is small: only
/// invalid caller input can fail. Lookups report absence through `Option`,
/// not through an error.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is empty or exceeds the maximum length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Explicit TTL was not a positive duration
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
}

// == Get-Or-Set Error ==
/// Error returned by [`CacheManager::get_or_set`](crate::manager::CacheManager::get_or_set).
///
/// A failed fetch is surfaced to the caller unchanged (Display and source
/// forward to the inner error) so the caller can apply its own retry or
/// backoff policy. The cache never retries and never stores a failed result.
#[derive(Error, Debug)]
pub enum GetOrSetError<E>
where
    E: std::error::Error,
{
    /// The cache rejected the operation before the fetch ran
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The caller-supplied fetch failed
    #[error(transparent)]
    Fetch(E),
}

impl<E> GetOrSetError<E>
where
    E: std::error::Error,
{
    /// Returns the caller's fetch error, if that is what failed.
    pub fn into_fetch(self) -> Option<E> {
        match self {
            GetOrSetError::Fetch(err) => Some(err),
            GetOrSetError::Cache(_) => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
