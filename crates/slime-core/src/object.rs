//! Insertion-ordered symbol map backing OBJECT values.
//!
//! # Layout
//!
//! Entries live in two dense vectors, `symbols` and `values`, indexed by
//! insertion position. Lookup goes through a chained hash index built from
//! plain indices:
//!
//! - `buckets[b]` holds the position of the most recently inserted entry whose
//!   symbol hashes to bucket `b`, or `None`.
//! - `next[i]` holds the position of the next entry in the same bucket as
//!   entry `i`, or `None` at the end of the chain.
//!
//! The logical `capacity` starts at 16 and doubles when an append finds the
//! map full. Doubling reallocates the index and rebuilds every chain from the
//! dense vectors in order; the dense vectors themselves are never reordered,
//! so iteration order is always insertion order.
//!
//! A second insert under an existing symbol is ignored: the first value wins.

use crate::symbol::Symbol;

const INITIAL_CAPACITY: usize = 16;

/// Bucket count for a given capacity; kept off powers of two so sequential
/// symbols spread across buckets.
fn bucket_count(capacity: usize) -> usize {
    capacity + (capacity >> 1) - 1
}

/// Insertion-ordered map from [`Symbol`] to `V` with first-write-wins inserts.
///
/// ```
/// use slime_core::{FieldMap, Symbol};
///
/// let mut map = FieldMap::new();
/// assert!(map.insert(Symbol::new(3), "first").is_some());
/// assert!(map.insert(Symbol::new(3), "second").is_none());
/// assert_eq!(map.get(Symbol::new(3)), Some(&"first"));
/// ```
#[derive(Debug, Clone)]
pub struct FieldMap<V> {
    symbols: Vec<Symbol>,
    values: Vec<V>,
    next: Vec<Option<u32>>,
    buckets: Vec<Option<u32>>,
    capacity: usize,
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self {
            symbols: Vec::with_capacity(INITIAL_CAPACITY),
            values: Vec::with_capacity(INITIAL_CAPACITY),
            next: Vec::with_capacity(INITIAL_CAPACITY),
            buckets: vec![None; bucket_count(INITIAL_CAPACITY)],
            capacity: INITIAL_CAPACITY,
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of entries the current index was sized for. Appending past it
    /// triggers a full rehash.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert `value` under `symbol` unless the symbol is already present.
    ///
    /// Returns the freshly stored value, or `None` if the symbol was taken;
    /// in that case `value` is dropped and the existing entry is untouched.
    pub fn insert(&mut self, symbol: Symbol, value: V) -> Option<&mut V> {
        if self.position(symbol).is_some() {
            return None;
        }
        if self.symbols.len() == self.capacity {
            self.rehash();
        }
        let pos = self.symbols.len();
        let bucket = symbol.id() as usize % self.buckets.len();
        self.next.push(self.buckets[bucket]);
        self.buckets[bucket] = Some(pos as u32);
        self.symbols.push(symbol);
        self.values.push(value);
        self.values.last_mut()
    }

    pub fn get(&self, symbol: Symbol) -> Option<&V> {
        self.position(symbol).map(|pos| &self.values[pos])
    }

    pub fn get_mut(&mut self, symbol: Symbol) -> Option<&mut V> {
        self.position(symbol).map(|pos| &mut self.values[pos])
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.position(symbol).is_some()
    }

    /// Entry at insertion position `pos`.
    pub fn get_index(&self, pos: usize) -> Option<(Symbol, &V)> {
        Some((*self.symbols.get(pos)?, self.values.get(pos)?))
    }

    /// Symbols in insertion order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Values in insertion order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// `(symbol, value)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Symbol, &V)> + '_ {
        self.symbols.iter().copied().zip(self.values.iter())
    }

    fn position(&self, symbol: Symbol) -> Option<usize> {
        let mut link = self.buckets[symbol.id() as usize % self.buckets.len()];
        while let Some(pos) = link {
            let pos = pos as usize;
            if self.symbols[pos] == symbol {
                return Some(pos);
            }
            link = self.next[pos];
        }
        None
    }

    fn rehash(&mut self) {
        self.capacity <<= 1;
        let buckets = bucket_count(self.capacity);
        self.buckets = vec![None; buckets];
        self.next.clear();
        for (pos, symbol) in self.symbols.iter().enumerate() {
            let bucket = symbol.id() as usize % buckets;
            self.next.push(self.buckets[bucket]);
            self.buckets[bucket] = Some(pos as u32);
        }
        let additional = self.capacity - self.symbols.len();
        self.symbols.reserve(additional);
        self.values.reserve(additional);
        self.next.reserve(additional);
        tracing::trace!(
            capacity = self.capacity,
            entries = self.symbols.len(),
            "rehashed object field index"
        );
    }
}
