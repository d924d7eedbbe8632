//! Read side of the counters.
//!
//! Components record into plain `u64` fields on their own hot paths; callers
//! read them back through [`StatsProvider`] without depending on which
//! component they hold.

/// Types that can report a snapshot of their counters.
pub trait StatsProvider<S> {
    fn stats(&self) -> S;
}
