//! Field-name interning.
//!
//! Every tree owns exactly one [`SymbolTable`]. Objects never store their
//! field names; they store the [`Symbol`] the table assigned to the name, so
//! the same name used in a thousand objects is kept once.

use std::collections::HashMap;
use std::fmt;

/// Small integer handle for an interned field name.
///
/// Symbols are only meaningful within the table that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Wrap a raw symbol id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw id, assigned sequentially from 0.
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only bidirectional map between field names and symbols.
///
/// `insert` is idempotent: a name seen before gets its original symbol back.
/// Nothing is ever removed, so a symbol stays valid for the life of the table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<Box<str>>,
    symbols: HashMap<Box<str>, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, allocating the next sequential symbol if it is new.
    ///
    /// ```
    /// use slime_core::SymbolTable;
    ///
    /// let mut table = SymbolTable::new();
    /// let a = table.insert("a");
    /// let b = table.insert("b");
    /// assert_eq!(table.insert("a"), a);
    /// assert_eq!(b.id(), a.id() + 1);
    /// ```
    pub fn insert(&mut self, name: &str) -> Symbol {
        if let Some(&symbol) = self.symbols.get(name) {
            return symbol;
        }
        let symbol = Symbol(self.names.len() as u32);
        self.names.push(name.into());
        self.symbols.insert(name.into(), symbol);
        symbol
    }

    /// Find the symbol for `name` without interning it.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Reverse lookup: the name a symbol was assigned to.
    pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
        self.names.get(symbol.0 as usize).map(|name| &**name)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        (symbol.0 as usize) < self.names.len()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All `(symbol, name)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| (Symbol(id as u32), &**name))
    }
}

/// Anything that can address an object field: a name or a resolved symbol.
///
/// Names are interned on write and looked up on read. Symbols are used
/// as-is, but only if the tree's table actually allocated them.
pub trait FieldKey {
    /// Resolve for insertion, interning names as needed.
    fn intern(&self, names: &mut SymbolTable) -> Option<Symbol>;

    /// Resolve for lookup; never touches the table.
    fn find(&self, names: &SymbolTable) -> Option<Symbol>;
}

impl FieldKey for Symbol {
    fn intern(&self, names: &mut SymbolTable) -> Option<Symbol> {
        self.find(names)
    }

    fn find(&self, names: &SymbolTable) -> Option<Symbol> {
        names.contains(*self).then_some(*self)
    }
}

impl FieldKey for &str {
    fn intern(&self, names: &mut SymbolTable) -> Option<Symbol> {
        Some(names.insert(self))
    }

    fn find(&self, names: &SymbolTable) -> Option<Symbol> {
        names.lookup(self)
    }
}

impl FieldKey for String {
    fn intern(&self, names: &mut SymbolTable) -> Option<Symbol> {
        Some(names.insert(self))
    }

    fn find(&self, names: &SymbolTable) -> Option<Symbol> {
        names.lookup(self)
    }
}

impl FieldKey for &String {
    fn intern(&self, names: &mut SymbolTable) -> Option<Symbol> {
        Some(names.insert(self))
    }

    fn find(&self, names: &SymbolTable) -> Option<Symbol> {
        names.lookup(self)
    }
}
