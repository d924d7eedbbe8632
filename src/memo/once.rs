//! One-shot memoizer.
//!
//! ```text
//!   UNINITIALIZED ──first successful call──► CACHED (terminal)
//! ```
//!
//! The first call runs the wrapped function with whatever arguments it was
//! given; every later call returns the stored result and ignores its
//! arguments. There is no reset.
//!
//! The transition is a plain unsynchronized write. `call` takes `&mut self`,
//! so sharing one instance across threads needs an external lock, and two
//! instances never coordinate.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::metrics::{MemoStats, StatsProvider};

/// Runs the wrapped function once and returns that result forever.
///
/// # Example
///
/// ```
/// use memokit::memo::EvaluateOnce;
///
/// let mut addressbook_dir =
///     EvaluateOnce::new(|profile: &str| format!("/home/u/.thunderbird/{profile}"));
///
/// assert_eq!(addressbook_dir.call("default"), "/home/u/.thunderbird/default");
/// // later arguments are ignored
/// assert_eq!(addressbook_dir.call("other"), "/home/u/.thunderbird/default");
/// ```
pub struct EvaluateOnce<A, T, F> {
    func: F,
    value: Option<T>,
    hits: u64,
    misses: u64,
    _args: PhantomData<fn(A)>,
}

impl<A, T, F> EvaluateOnce<A, T, F> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            value: None,
            hits: 0,
            misses: 0,
            _args: PhantomData,
        }
    }

    /// The stored result, `None` until the first successful call.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.value.is_some()
    }

    /// Consumes the memoizer and returns the stored result, if any.
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    fn store(&mut self, value: T) -> &T {
        self.misses += 1;
        trace!("one-shot value computed");
        self.value.insert(value)
    }
}

impl<A, T, F> EvaluateOnce<A, T, F>
where
    T: Clone,
    F: FnMut(A) -> T,
{
    pub fn call(&mut self, args: A) -> T {
        if let Some(value) = &self.value {
            self.hits += 1;
            return value.clone();
        }
        let value = (self.func)(args);
        self.store(value).clone()
    }
}

impl<A, T, E, F> EvaluateOnce<A, T, F>
where
    T: Clone,
    F: FnMut(A) -> Result<T, E>,
{
    /// Like [`call`](Self::call) for a fallible function. An `Err` keeps the
    /// memoizer uninitialized so the next call tries again.
    pub fn try_call(&mut self, args: A) -> Result<T, E> {
        if let Some(value) = &self.value {
            self.hits += 1;
            return Ok(value.clone());
        }
        let value = (self.func)(args)?;
        Ok(self.store(value).clone())
    }
}

impl<A, T, F> StatsProvider<MemoStats> for EvaluateOnce<A, T, F> {
    fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<A, T: fmt::Debug, F> fmt::Debug for EvaluateOnce<A, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluateOnce")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn computes_exactly_once_whatever_the_arguments() {
        let invocations = Cell::new(0);
        let mut once: EvaluateOnce<&[i32], i32, _> = EvaluateOnce::new(|args: &[i32]| {
            invocations.set(invocations.get() + 1);
            args.iter().sum::<i32>() + 100
        });

        let a = once.call(&[]);
        let b = once.call(&[1]);
        let c = once.call(&[2]);

        assert_eq!(invocations.get(), 1);
        assert_eq!((a, b, c), (100, 100, 100));
        assert_eq!(once.stats(), MemoStats { hits: 2, misses: 1 });
    }

    #[test]
    fn failed_first_call_is_retried() {
        let attempts = Cell::new(0);
        let mut once = EvaluateOnce::new(|()| {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 2 {
                Err("profile dir missing")
            } else {
                Ok(String::from("abook.mab"))
            }
        });

        assert_eq!(once.try_call(()), Err("profile dir missing"));
        assert!(!once.is_evaluated());
        assert_eq!(once.try_call(()), Ok("abook.mab".to_string()));
        assert_eq!(once.try_call(()), Ok("abook.mab".to_string()));
        assert_eq!(attempts.get(), 2);
        assert_eq!(once.get().map(String::as_str), Some("abook.mab"));
    }

    #[test]
    fn results_are_identical_clones() {
        let mut once = EvaluateOnce::new(|()| vec![1u8, 2, 3]);
        let first = once.call(());
        let second = once.call(());
        assert_eq!(first, second);
        assert_eq!(once.into_value(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn unevaluated_state() {
        let once: EvaluateOnce<(), u8, _> = EvaluateOnce::new(|()| 1u8);
        assert!(!once.is_evaluated());
        assert_eq!(once.get(), None);
        assert!(format!("{:?}", once).contains("None"));
    }
}
