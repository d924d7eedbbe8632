//! Single-slot memoizer.
//!
//! Remembers the most recent argument set and its result. A call whose
//! arguments equal the remembered ones is answered without invoking the
//! wrapped function; any other call invokes it and replaces the slot.
//!
//! ```text
//!   call(1, 2)  ─► miss  slot = ((1, 2), r1)
//!   call(1, 2)  ─► hit   r1
//!   call(3, 4)  ─► miss  slot = ((3, 4), r2)
//!   call(1, 2)  ─► miss  slot = ((1, 2), r1')   history depth is 1
//! ```
//!
//! Multi-argument functions take their arguments as one value: a tuple for
//! positional arguments, a struct when some of them are named. Equality is
//! `PartialEq` on that value.

use std::fmt;

use tracing::trace;

use crate::metrics::{MemoStats, StatsProvider};

/// Wraps `f` and caches the result of the last argument set.
///
/// # Example
///
/// ```
/// use memokit::memo::SingleSlot;
///
/// let mut calls = 0;
/// let mut add = SingleSlot::new(|&(a, b): &(i32, i32)| {
///     calls += 1;
///     a + b
/// });
///
/// assert_eq!(add.call((1, 2)), 3);
/// assert_eq!(add.call((1, 2)), 3);
/// assert_eq!(add.hits(), 1);
/// assert_eq!(add.misses(), 1);
/// drop(add);
/// assert_eq!(calls, 1);
/// ```
pub struct SingleSlot<A, T, F> {
    func: F,
    slot: Option<(A, T)>,
    name: Option<String>,
    hits: u64,
    misses: u64,
}

impl<A, T, F> SingleSlot<A, T, F> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            slot: None,
            name: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Attaches a diagnostic label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Forgets the remembered call and zeroes the counters.
    pub fn clear(&mut self) {
        self.slot = None;
        self.hits = 0;
        self.misses = 0;
    }

    /// Arguments of the remembered call, `None` when unset.
    pub fn current_args(&self) -> Option<&A> {
        self.slot.as_ref().map(|(args, _)| args)
    }

    /// Result of the remembered call, `None` when unset.
    pub fn current_value(&self) -> Option<&T> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Consumes the memoizer and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

impl<A, T, F> SingleSlot<A, T, F>
where
    A: PartialEq,
{
    fn remembered(&mut self, args: &A) -> Option<&T> {
        match &self.slot {
            Some((last, value)) if last == args => {
                self.hits += 1;
                Some(value)
            },
            _ => None,
        }
    }

    fn remember(&mut self, args: A, value: T) -> &T {
        self.misses += 1;
        trace!(memo = self.label(), misses = self.misses, "single-slot miss");
        let (_, value) = self.slot.insert((args, value));
        value
    }
}

impl<A, T, F> SingleSlot<A, T, F>
where
    A: PartialEq,
    T: Clone,
    F: FnMut(&A) -> T,
{
    /// Returns `f(&args)`, reusing the remembered result when `args` equals
    /// the previous call's arguments.
    pub fn call(&mut self, args: A) -> T {
        if let Some(value) = self.remembered(&args) {
            return value.clone();
        }
        let value = (self.func)(&args);
        self.remember(args, value).clone()
    }
}

impl<A, T, E, F> SingleSlot<A, T, F>
where
    A: PartialEq,
    T: Clone,
    F: FnMut(&A) -> Result<T, E>,
{
    /// Like [`call`](Self::call) for a fallible function.
    ///
    /// An `Err` is returned as-is and leaves the remembered call and the
    /// counters untouched.
    pub fn try_call(&mut self, args: A) -> Result<T, E> {
        if let Some(value) = self.remembered(&args) {
            return Ok(value.clone());
        }
        let value = (self.func)(&args)?;
        Ok(self.remember(args, value).clone())
    }
}

impl<A, T, F> StatsProvider<MemoStats> for SingleSlot<A, T, F> {
    fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// `"<name>: hit=H, miss=M"`.
impl<A, T, F> fmt::Display for SingleSlot<A, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: hit={}, miss={}", self.label(), self.hits, self.misses)
    }
}

impl<A: fmt::Debug, T: fmt::Debug, F> fmt::Debug for SingleSlot<A, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleSlot")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}
