//! memokit: a bounded LRU cache with hit/miss counters and two function
//! memoizers.
//!
//! - [`policy::lru::LruCache`]: fixed-capacity cache, strict LRU eviction.
//! - [`memo::SingleSlot`]: remembers the last argument set and its result.
//! - [`memo::EvaluateOnce`]: computes once, returns that result forever.
//!
//! None of the types are synchronized; wrap them in a lock to share them.

pub mod builder;
mod ds;
pub mod error;
pub mod memo;
pub mod metrics;
pub mod policy;
pub mod prelude;
