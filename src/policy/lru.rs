//! # Bounded LRU Cache
//!
//! Fixed-capacity key/value cache with least-recently-used eviction and
//! hit/miss/insert counters.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId> (non-owning index)                     │   │
//!   │   │     "a" ──────────────┐                                      │   │
//!   │   │     "b" ──────────────┼───────────┐                          │   │
//!   │   │     "c" ──────────────┼───────────┼───────────┐              │   │
//!   │   └───────────────────────┼───────────┼───────────┼──────────────┘   │
//!   │                           ▼           ▼           ▼                  │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<K, V> (owns entries)                            │   │
//!   │   │  lru ──► [a, 1] ◄──► [b, 2] ◄──► [c, 3] ◄── mru              │   │
//!   │   │                                                              │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   put(d, 4) with max_size = 3
//!     lru ──► [a] ◄──► [b] ◄──► [c] ◄── mru
//!     1. full: evict [a], its slot goes on the free list
//!     2. append [d] at mru, reusing that slot
//!     lru ──► [b] ◄──► [c] ◄──► [d] ◄── mru
//!
//!   get(b)
//!     1. index lookup: O(1)
//!     2. move [b] to mru: O(1)
//!     lru ──► [c] ◄──► [d] ◄──► [b] ◄── mru
//! ```
//!
//! ## Methods
//!
//! | Method                  | Complexity | Counters            | Reorders |
//! |-------------------------|------------|---------------------|----------|
//! | `put(k, v)`             | O(1)*      | inserts             | yes      |
//! | `get(&k)`               | O(1)       | hits / misses       | on hit   |
//! | `get_or_insert(k, f)`   | O(1)*      | hit, or miss+insert | yes      |
//! | `peek(&k)`              | O(1)       | -                   | no       |
//! | `contains(&k)`          | O(1)       | -                   | no       |
//! | `remove(&k)`            | O(1)       | -                   | -        |
//! | `pop_lru()`             | O(1)       | -                   | -        |
//! | `iter()` / `keys()`     | O(n)       | -                   | no       |
//! | `clear()`               | O(n)       | resets all          | -        |
//!
//! \* amortized, may evict one entry.
//!
//! ## Re-putting a present key
//!
//! `put` on a key that is already cached moves the entry to the MRU position
//! and, by default, keeps the value that was stored first. Set
//! [`LruCacheBuilder::update_value_on_existing_key`] to replace it instead.
//!
//! ## Thread Safety
//!
//! Not synchronized. Every mutating method takes `&mut self`.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::LruCacheBuilder;
use crate::ds::{RecencyList, SlotId};
use crate::error::{ConfigError, LookupError};
use crate::metrics::{LruStats, StatsProvider};

/// Bounded least-recently-used cache.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Ok(&1));
///
/// // "b" is now least recently used
/// cache.put("c", 3);
/// assert!(!cache.contains(&"b"));
/// ```
pub struct LruCache<K, V> {
    list: RecencyList<K, V>,
    index: FxHashMap<K, SlotId>,
    max_size: usize,
    name: Option<String>,
    update_value_on_existing_key: bool,
    hits: u64,
    misses: u64,
    inserts: u64,
    evictions: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero. See [`try_new`](Self::try_new).
    pub fn new(max_size: usize) -> Self {
        LruCacheBuilder::new(max_size).build()
    }

    pub fn try_new(max_size: usize) -> Result<Self, ConfigError> {
        LruCacheBuilder::new(max_size).try_build()
    }

    /// Creates a labelled cache. The label only shows up in `Display` and logs.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero.
    pub fn with_name(max_size: usize, name: impl Into<String>) -> Self {
        LruCacheBuilder::new(max_size).name(name).build()
    }

    pub fn builder(max_size: usize) -> LruCacheBuilder {
        LruCacheBuilder::new(max_size)
    }

    pub(crate) fn from_builder(builder: LruCacheBuilder) -> Self {
        let reserve = if builder.prealloc { builder.max_size } else { 0 };
        Self {
            list: RecencyList::with_capacity(reserve),
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            max_size: builder.max_size,
            name: builder.name,
            update_value_on_existing_key: builder.update_value_on_existing_key,
            hits: 0,
            misses: 0,
            inserts: 0,
            evictions: 0,
        }
    }

    /// Stores `value` under `key` and marks the entry most recently used.
    ///
    /// Every call counts as an insert. A present key keeps its old value
    /// unless the cache was built with `update_value_on_existing_key`. A new
    /// key that pushes the cache past `max_size` evicts the least recently
    /// used entry.
    pub fn put(&mut self, key: K, value: V) {
        self.inserts += 1;

        if let Some(&id) = self.index.get(&key) {
            self.list.touch(id);
            if self.update_value_on_existing_key {
                if let Some(entry) = self.list.entry_mut(id) {
                    entry.value = value;
                }
            }
            return;
        }

        self.insert_new(key, value);
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V, LookupError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            self.misses += 1;
            return Err(LookupError::NotFound);
        };

        self.hits += 1;
        self.list.touch(id);
        Ok(&self.list[id].value)
    }

    /// Returns the cached value for `key`, or stores and returns `creator()`.
    ///
    /// A hit counts and reorders exactly like [`get`](Self::get): the entry
    /// becomes most recently used. This differs from a plain "look up or
    /// store" helper that leaves order alone on a hit; use
    /// [`peek`](Self::peek) followed by [`put`](Self::put) for that. A miss
    /// runs `creator` exactly once and counts as one miss and one insert.
    pub fn get_or_insert<F>(&mut self, key: K, creator: F) -> &V
    where
        F: FnOnce() -> V,
    {
        match self.try_get_or_insert(key, || Ok::<V, Infallible>(creator())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible [`get_or_insert`](Self::get_or_insert).
    ///
    /// An `Err` from `creator` is returned unchanged. Nothing is stored and
    /// only the miss is counted.
    pub fn try_get_or_insert<F, E>(&mut self, key: K, creator: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let id = match self.index.get(&key) {
            Some(&id) => {
                self.hits += 1;
                self.list.touch(id);
                id
            },
            None => {
                self.misses += 1;
                let value = creator()?;
                self.inserts += 1;
                self.insert_new(key, value)
            },
        };
        Ok(&self.list[id].value)
    }

    /// Returns the value for `key` without touching recency or counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&id| &self.list[id].value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_lru()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// The entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.lru().map(|entry| (&entry.key, &entry.value))
    }

    /// Drops every entry and resets all counters.
    pub fn clear(&mut self) {
        debug!(cache = self.label(), len = self.list.len(), "clearing cache");
        self.list.clear();
        self.index.clear();
        self.reset_stats();
    }

    /// Zeroes the counters, keeping the entries.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.inserts = 0;
        self.evictions = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert!(self.list.len() <= self.max_size);
        assert!(self.list.allocated_slots() <= self.max_size);
        assert_eq!(self.list.len(), self.index.len());
        for entry in self.list.iter() {
            let id = self.index[&entry.key];
            assert!(self.list[id].key == entry.key);
        }
    }

    // Evicting first frees a slot for the new entry, so a full cache never
    // allocates past `max_size` slots.
    fn insert_new(&mut self, key: K, value: V) -> SlotId {
        if self.list.len() >= self.max_size {
            self.evict_lru();
        }
        let id = self.list.push_mru(key.clone(), value);
        self.index.insert(key, id);
        id
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.list.pop_lru() {
            self.index.remove(&entry.key);
            self.evictions += 1;
            trace!(
                cache = self.label(),
                len = self.list.len(),
                "evicted least recently used entry"
            );
        }
    }
}

impl<K, V> LruCache<K, V> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn updates_value_on_existing_key(&self) -> bool {
        self.update_value_on_existing_key
    }

    /// Entries from least to most recently used. Does not touch recency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("?")
    }
}

impl<K, V> StatsProvider<LruStats> for LruCache<K, V> {
    fn stats(&self) -> LruStats {
        LruStats {
            hits: self.hits,
            misses: self.misses,
            inserts: self.inserts,
            evictions: self.evictions,
            len: self.list.len(),
            max_size: self.max_size,
        }
    }
}

/// `"<name>: maxsize=M, items=N, hit=H, miss=Ms, inserts=I"`; `?` stands in
/// for an unset name.
impl<K, V> fmt::Display for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: maxsize={}, items={}, hit={}, miss={}, inserts={}",
            self.label(),
            self.max_size,
            self.list.len(),
            self.hits,
            self.misses,
            self.inserts
        )
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("name", &self.name)
            .field("max_size", &self.max_size)
            .field("len", &self.list.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .field("inserts", &self.inserts)
            .finish_non_exhaustive()
    }
}
