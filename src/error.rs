//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is configured with invalid
//!   parameters (e.g. `max_size == 0`).
//! - [`LookupError`]: Returned by [`LruCache::get`](crate::policy::lru::LruCache::get)
//!   when the key is absent.
//!
//! Errors raised by caller-supplied code (creator thunks, memoized
//! functions) are never wrapped in these types; they come back as the
//! caller's own error type.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::{ConfigError, LookupError};
//! use memokit::policy::lru::LruCache;
//!
//! let bad: Result<LruCache<u32, u32>, ConfigError> = LruCache::try_new(0);
//! assert!(bad.is_err());
//!
//! let mut cache: LruCache<u32, u32> = LruCache::new(4);
//! assert_eq!(cache.get(&1), Err(LookupError::NotFound));
//! ```

use thiserror::Error;

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`LruCacheBuilder::try_build`](crate::builder::LruCacheBuilder::try_build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Failure of a keyed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("key not found in cache")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max_size must be greater than zero");
        assert_eq!(err.to_string(), "max_size must be greater than zero");
        assert_eq!(err.message(), "max_size must be greater than zero");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn lookup_display() {
        assert_eq!(LookupError::NotFound.to_string(), "key not found in cache");
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
        assert_error::<LookupError>();
    }
}
