//! The tree root.

use std::fmt;

use crate::cursor::Cursor;
use crate::inspector::Inspector;
use crate::object::FieldMap;
use crate::symbol::{Symbol, SymbolTable};
use crate::value::Value;

/// One self-contained tree: a root value plus the symbol table shared by
/// every object in it.
///
/// A new tree holds a single NIX root. The root setters replace the root
/// and return a cursor on it; everything below the root is added through
/// cursors. Once no cursor is alive, a `&Slime` may be shared freely across
/// threads for reading.
///
/// ```
/// use slime_core::Slime;
///
/// let mut slime = Slime::new();
/// let mut root = slime.set_object();
/// root.set_long("a", 1);
/// root.set_string("b", "x");
/// assert!(!root.set_long("a", 99).valid());
///
/// let root = slime.root();
/// assert_eq!(root.field_count(), 2);
/// assert_eq!(root.field("a").as_long().unwrap(), 1);
/// assert!(!root.field("missing").valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Slime {
    names: SymbolTable,
    root: Value,
}

impl Slime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read view of the root. Always valid.
    pub fn root(&self) -> Inspector<'_> {
        Inspector::new(&self.names, &self.root)
    }

    /// Write view of the root, for adding to an existing root container.
    pub fn root_mut(&mut self) -> Cursor<'_> {
        Cursor::new(&mut self.names, &mut self.root)
    }

    fn set_root(&mut self, value: Value) -> Cursor<'_> {
        self.root = value;
        self.root_mut()
    }

    pub fn set_nix(&mut self) -> Cursor<'_> {
        self.set_root(Value::Nix)
    }

    pub fn set_bool(&mut self, value: bool) -> Cursor<'_> {
        self.set_root(Value::Bool(value))
    }

    pub fn set_long(&mut self, value: i64) -> Cursor<'_> {
        self.set_root(Value::Long(value))
    }

    pub fn set_double(&mut self, value: f64) -> Cursor<'_> {
        self.set_root(Value::Double(value))
    }

    pub fn set_string(&mut self, value: &str) -> Cursor<'_> {
        self.set_root(Value::string(value))
    }

    pub fn set_utf8(&mut self, value: &[u8]) -> Cursor<'_> {
        self.set_root(Value::utf8(value))
    }

    pub fn set_data(&mut self, value: &[u8]) -> Cursor<'_> {
        self.set_root(Value::data(value))
    }

    pub fn set_array(&mut self) -> Cursor<'_> {
        self.set_root(Value::array())
    }

    pub fn set_object(&mut self) -> Cursor<'_> {
        self.set_root(Value::object())
    }

    /// Move the current root into a new OBJECT root under `name`.
    ///
    /// Returns a cursor on the new root object.
    pub fn wrap(&mut self, name: &str) -> Cursor<'_> {
        let symbol = self.names.insert(name);
        let mut map = FieldMap::new();
        map.insert(symbol, std::mem::take(&mut self.root));
        self.root = Value::Object(map);
        tracing::trace!(name, "wrapped slime root");
        self.root_mut()
    }

    /// Intern a field name in this tree's table.
    pub fn insert_symbol(&mut self, name: &str) -> Symbol {
        self.names.insert(name)
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<Symbol> {
        self.names.lookup(name)
    }

    pub fn symbol_name(&self, symbol: Symbol) -> Option<&str> {
        self.names.resolve(symbol)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.names
    }
}

impl PartialEq for Slime {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl Eq for Slime {}

impl fmt::Display for Slime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}
