/// Point-in-time counters of an [`LruCache`](crate::policy::lru::LruCache).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub max_size: usize,
}

impl LruStats {
    /// Fraction of lookups that were hits, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }
}

/// Point-in-time counters of a memoizer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    /// Calls answered from the remembered result.
    pub hits: u64,
    /// Calls that invoked the wrapped function.
    pub misses: u64,
}

impl MemoStats {
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
