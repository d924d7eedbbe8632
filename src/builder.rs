//! Configuration for [`LruCache`].
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::LruCacheBuilder;
//!
//! let mut cache = LruCacheBuilder::new(2)
//!     .name("session-list")
//!     .update_value_on_existing_key(true)
//!     .build::<&str, u32>();
//!
//! cache.put("a", 1);
//! cache.put("a", 2);
//! assert_eq!(cache.get(&"a"), Ok(&2));
//! assert!(cache.to_string().starts_with("session-list: maxsize=2"));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;

/// Builder for [`LruCache`].
///
/// | Setting                        | Default | Meaning                                   |
/// |--------------------------------|---------|-------------------------------------------|
/// | `max_size`                     | -       | Entry bound, must be > 0                  |
/// | `name`                         | unset   | Label used in `Display`                   |
/// | `update_value_on_existing_key` | `false` | `put` on a present key replaces the value |
/// | `prealloc`                     | `true`  | Reserve `max_size` slots up front         |
#[derive(Debug, Clone)]
pub struct LruCacheBuilder {
    pub(crate) max_size: usize,
    pub(crate) name: Option<String>,
    pub(crate) update_value_on_existing_key: bool,
    pub(crate) prealloc: bool,
}

impl LruCacheBuilder {
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            name: None,
            update_value_on_existing_key: false,
            prealloc: true,
        }
    }

    /// Sets the diagnostic label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// When `false` (the default), re-putting a present key only refreshes
    /// its recency and keeps the stored value.
    pub fn update_value_on_existing_key(mut self, update: bool) -> Self {
        self.update_value_on_existing_key = update;
        self
    }

    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.prealloc = prealloc;
        self
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the cache, returning an error on invalid parameters instead of
    /// panicking.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        if self.max_size == 0 {
            return Err(ConfigError::new("max_size must be greater than zero"));
        }
        Ok(LruCache::from_builder(self))
    }
}
