//! Function memoizers.
//!
//! Both wrappers own the function they memoize and expose it through
//! `call` / `try_call` plus inspection methods. They differ in retention:
//! [`SingleSlot`] keeps the last argument set and result, [`EvaluateOnce`]
//! keeps the first result and ignores arguments from then on.

pub mod once;
pub mod single_slot;

pub use once::EvaluateOnce;
pub use single_slot::SingleSlot;
