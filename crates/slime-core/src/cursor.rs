//! Write-side access to a tree.
//!
//! A [`Cursor`] is the only way to grow a tree. It points at one slot and
//! borrows the tree mutably, so a tree under construction has exactly one
//! writer at a time.
//!
//! - `add_*` appends to an ARRAY and returns a cursor on the new entry.
//! - `set_*` inserts into an OBJECT under a name or [`Symbol`] and returns a
//!   cursor on the new field.
//!
//! Every other combination yields the *invalid* cursor: `add_*` on a
//! non-array, `set_*` on a non-object, any call on an invalid cursor, a
//! symbol the tree never allocated, and a field name that is already taken.
//! The last case leaves the existing field untouched (first write wins).
//! Nothing here fails; callers check [`Cursor::valid`] when they care.
//!
//! [`Symbol`]: crate::Symbol

use std::fmt;

use crate::inspector::Inspector;
use crate::symbol::{FieldKey, SymbolTable};
use crate::value::{Type, Value};

struct Slot<'a> {
    names: &'a mut SymbolTable,
    value: &'a mut Value,
}

/// Write capability over exactly one slot of a tree.
pub struct Cursor<'a> {
    slot: Option<Slot<'a>>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(names: &'a mut SymbolTable, value: &'a mut Value) -> Self {
        Self {
            slot: Some(Slot { names, value }),
        }
    }

    /// The cursor returned whenever a write is refused.
    pub const fn invalid() -> Self {
        Self { slot: None }
    }

    pub fn valid(&self) -> bool {
        self.slot.is_some()
    }

    pub fn kind(&self) -> Type {
        self.inspect().kind()
    }

    pub fn entry_count(&self) -> usize {
        self.inspect().entry_count()
    }

    pub fn field_count(&self) -> usize {
        self.inspect().field_count()
    }

    /// Read-only view of the slot this cursor points at.
    pub fn inspect(&self) -> Inspector<'_> {
        match &self.slot {
            Some(slot) => Inspector::new(&*slot.names, &*slot.value),
            None => Inspector::invalid(),
        }
    }

    /// Cursor on an existing array entry.
    pub fn entry(&mut self, idx: usize) -> Cursor<'_> {
        let Some(slot) = self.slot.as_mut() else {
            return Cursor::invalid();
        };
        match &mut *slot.value {
            Value::Array(items) => match items.get_mut(idx) {
                Some(item) => Cursor::new(slot.names, item),
                None => Cursor::invalid(),
            },
            _ => Cursor::invalid(),
        }
    }

    /// Cursor on an existing object field.
    pub fn field(&mut self, key: impl FieldKey) -> Cursor<'_> {
        let Some(slot) = self.slot.as_mut() else {
            return Cursor::invalid();
        };
        let Value::Object(map) = &mut *slot.value else {
            return Cursor::invalid();
        };
        let Some(symbol) = key.find(slot.names) else {
            return Cursor::invalid();
        };
        match map.get_mut(symbol) {
            Some(value) => Cursor::new(slot.names, value),
            None => Cursor::invalid(),
        }
    }

    fn append(&mut self, value: Value) -> Cursor<'_> {
        let Some(slot) = self.slot.as_mut() else {
            return Cursor::invalid();
        };
        let Value::Array(items) = &mut *slot.value else {
            return Cursor::invalid();
        };
        items.push(value);
        match items.last_mut() {
            Some(item) => Cursor::new(slot.names, item),
            None => Cursor::invalid(),
        }
    }

    fn insert(&mut self, key: impl FieldKey, value: Value) -> Cursor<'_> {
        let Some(slot) = self.slot.as_mut() else {
            return Cursor::invalid();
        };
        let Value::Object(map) = &mut *slot.value else {
            return Cursor::invalid();
        };
        let Some(symbol) = key.intern(slot.names) else {
            return Cursor::invalid();
        };
        match map.insert(symbol, value) {
            Some(stored) => Cursor::new(slot.names, stored),
            None => Cursor::invalid(),
        }
    }

    pub fn add_nix(&mut self) -> Cursor<'_> {
        self.append(Value::Nix)
    }

    pub fn add_bool(&mut self, value: bool) -> Cursor<'_> {
        self.append(Value::Bool(value))
    }

    pub fn add_long(&mut self, value: i64) -> Cursor<'_> {
        self.append(Value::Long(value))
    }

    pub fn add_double(&mut self, value: f64) -> Cursor<'_> {
        self.append(Value::Double(value))
    }

    pub fn add_string(&mut self, value: &str) -> Cursor<'_> {
        self.append(Value::string(value))
    }

    /// Append a string given as raw UTF-8; decoded to text lazily on read.
    pub fn add_utf8(&mut self, value: &[u8]) -> Cursor<'_> {
        self.append(Value::utf8(value))
    }

    pub fn add_data(&mut self, value: &[u8]) -> Cursor<'_> {
        self.append(Value::data(value))
    }

    pub fn add_array(&mut self) -> Cursor<'_> {
        self.append(Value::array())
    }

    pub fn add_object(&mut self) -> Cursor<'_> {
        self.append(Value::object())
    }

    pub fn set_nix(&mut self, key: impl FieldKey) -> Cursor<'_> {
        self.insert(key, Value::Nix)
    }

    pub fn set_bool(&mut self, key: impl FieldKey, value: bool) -> Cursor<'_> {
        self.insert(key, Value::Bool(value))
    }

    pub fn set_long(&mut self, key: impl FieldKey, value: i64) -> Cursor<'_> {
        self.insert(key, Value::Long(value))
    }

    pub fn set_double(&mut self, key: impl FieldKey, value: f64) -> Cursor<'_> {
        self.insert(key, Value::Double(value))
    }

    pub fn set_string(&mut self, key: impl FieldKey, value: &str) -> Cursor<'_> {
        self.insert(key, Value::string(value))
    }

    /// Insert a string given as raw UTF-8; decoded to text lazily on read.
    pub fn set_utf8(&mut self, key: impl FieldKey, value: &[u8]) -> Cursor<'_> {
        self.insert(key, Value::utf8(value))
    }

    pub fn set_data(&mut self, key: impl FieldKey, value: &[u8]) -> Cursor<'_> {
        self.insert(key, Value::data(value))
    }

    pub fn set_array(&mut self, key: impl FieldKey) -> Cursor<'_> {
        self.insert(key, Value::array())
    }

    pub fn set_object(&mut self, key: impl FieldKey) -> Cursor<'_> {
        self.insert(key, Value::object())
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid() {
            write!(f, "Cursor({})", self.kind())
        } else {
            f.write_str("Cursor(invalid)")
        }
    }
}
