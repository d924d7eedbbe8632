pub use crate::builder::LruCacheBuilder;
pub use crate::error::{ConfigError, LookupError};
pub use crate::memo::{EvaluateOnce, SingleSlot};
pub use crate::metrics::{LruStats, MemoStats, StatsProvider};
pub use crate::policy::lru::LruCache;
