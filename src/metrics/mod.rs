pub mod snapshot;
pub mod traits;

pub use snapshot::{LruStats, MemoStats};
pub use traits::StatsProvider;
