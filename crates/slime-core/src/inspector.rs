//! Read-side access to a tree.
//!
//! An [`Inspector`] is a cheap, `Copy` view of one slot that may or may not
//! hold a value. Lookups that miss (unknown field, out-of-range index, a
//! field lookup on a non-object) produce an *invalid* inspector instead of
//! failing; it reports [`Type::Nix`] and behaves like an empty value.
//!
//! # Accessor rules
//!
//! Two accessor families disagree about `Nix`, and both behaviors are relied
//! upon:
//!
//! | accessor             | native types   | NIX / invalid | anything else      |
//! |----------------------|----------------|---------------|--------------------|
//! | `as_bool()`          | BOOL           | `Ok(false)`   | `Err(TypeMismatch)`|
//! | `as_long()`          | LONG, DOUBLE   | `Ok(0)`       | `Err(TypeMismatch)`|
//! | `as_double()`        | DOUBLE, LONG   | `Ok(0.0)`     | `Err(TypeMismatch)`|
//! | `as_str()`           | STRING         | `Ok("")`      | `Err(TypeMismatch)`|
//! | `as_utf8()`          | STRING         | `Ok(b"")`     | `Err(TypeMismatch)`|
//! | `as_data()`          | DATA           | `Ok(b"")`     | `Err(TypeMismatch)`|
//! | `as_*_or(default)`   | value          | `default`     | `default`          |
//!
//! DOUBLE read as long truncates toward zero; LONG read as double widens.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, SlimeError};
use crate::symbol::{FieldKey, Symbol, SymbolTable};
use crate::value::{Type, Value};
use crate::visitor::Visitor;

/// Read capability over one possibly-absent slot of a tree.
#[derive(Clone, Copy)]
pub struct Inspector<'a> {
    node: Option<(&'a SymbolTable, &'a Value)>,
}

impl<'a> Inspector<'a> {
    pub(crate) fn new(names: &'a SymbolTable, value: &'a Value) -> Self {
        Self {
            node: Some((names, value)),
        }
    }

    /// An inspector that references nothing.
    pub const fn invalid() -> Self {
        Self { node: None }
    }

    fn value(&self) -> Option<&'a Value> {
        self.node.map(|(_, value)| value)
    }

    fn child(&self, value: Option<&'a Value>) -> Self {
        match (self.node, value) {
            (Some((names, _)), Some(value)) => Inspector::new(names, value),
            _ => Inspector::invalid(),
        }
    }

    /// Whether this inspector references a real value.
    pub fn valid(&self) -> bool {
        self.node.is_some()
    }

    /// The type tag of the referenced value; `Nix` when invalid.
    pub fn kind(&self) -> Type {
        self.value().map_or(Type::Nix, Value::kind)
    }

    /// Number of array entries; 0 for anything but an ARRAY.
    pub fn entry_count(&self) -> usize {
        match self.value() {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    /// Number of object fields; 0 for anything but an OBJECT.
    pub fn field_count(&self) -> usize {
        match self.value() {
            Some(Value::Object(map)) => map.len(),
            _ => 0,
        }
    }

    /// Entry or field count, whichever applies.
    pub fn children(&self) -> usize {
        self.entry_count() + self.field_count()
    }

    fn mismatch(&self, requested: &'static str) -> SlimeError {
        SlimeError::TypeMismatch {
            requested,
            actual: self.kind().name(),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.value() {
            None | Some(Value::Nix) => Ok(false),
            Some(Value::Bool(value)) => Ok(*value),
            Some(_) => Err(self.mismatch("bool")),
        }
    }

    pub fn as_long(&self) -> Result<i64> {
        match self.value() {
            None | Some(Value::Nix) => Ok(0),
            Some(Value::Long(value)) => Ok(*value),
            Some(Value::Double(value)) => Ok(*value as i64),
            Some(_) => Err(self.mismatch("long")),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match self.value() {
            None | Some(Value::Nix) => Ok(0.0),
            Some(Value::Double(value)) => Ok(*value),
            Some(Value::Long(value)) => Ok(*value as f64),
            Some(_) => Err(self.mismatch("double")),
        }
    }

    pub fn as_str(&self) -> Result<&'a str> {
        match self.value() {
            None | Some(Value::Nix) => Ok(""),
            Some(Value::String(value)) => Ok(value.as_str()),
            Some(_) => Err(self.mismatch("string")),
        }
    }

    pub fn as_utf8(&self) -> Result<&'a [u8]> {
        match self.value() {
            None | Some(Value::Nix) => Ok(&[]),
            Some(Value::String(value)) => Ok(value.as_utf8()),
            Some(_) => Err(self.mismatch("utf8")),
        }
    }

    pub fn as_data(&self) -> Result<&'a [u8]> {
        match self.value() {
            None | Some(Value::Nix) => Ok(&[]),
            Some(Value::Data(value)) => Ok(&value[..]),
            Some(_) => Err(self.mismatch("data")),
        }
    }

    pub fn as_bool_or(&self, default: bool) -> bool {
        match self.value() {
            Some(Value::Bool(value)) => *value,
            _ => default,
        }
    }

    pub fn as_long_or(&self, default: i64) -> i64 {
        match self.value() {
            Some(Value::Long(value)) => *value,
            Some(Value::Double(value)) => *value as i64,
            _ => default,
        }
    }

    pub fn as_double_or(&self, default: f64) -> f64 {
        match self.value() {
            Some(Value::Double(value)) => *value,
            Some(Value::Long(value)) => *value as f64,
            _ => default,
        }
    }

    pub fn as_str_or<'d>(&self, default: &'d str) -> &'d str
    where
        'a: 'd,
    {
        match self.value() {
            Some(Value::String(value)) => value.as_str(),
            _ => default,
        }
    }

    pub fn as_utf8_or<'d>(&self, default: &'d [u8]) -> &'d [u8]
    where
        'a: 'd,
    {
        match self.value() {
            Some(Value::String(value)) => value.as_utf8(),
            _ => default,
        }
    }

    pub fn as_data_or<'d>(&self, default: &'d [u8]) -> &'d [u8]
    where
        'a: 'd,
    {
        match self.value() {
            Some(Value::Data(value)) => &value[..],
            _ => default,
        }
    }

    /// Array entry `idx`; invalid when out of range or not an array.
    pub fn entry(&self, idx: usize) -> Inspector<'a> {
        match self.value() {
            Some(Value::Array(items)) => self.child(items.get(idx)),
            _ => Inspector::invalid(),
        }
    }

    /// Object field by name or symbol; invalid when absent or not an object.
    pub fn field(&self, key: impl FieldKey) -> Inspector<'a> {
        match self.node {
            Some((names, Value::Object(map))) => {
                self.child(key.find(names).and_then(|symbol| map.get(symbol)))
            }
            _ => Inspector::invalid(),
        }
    }

    /// Call `f` once per array entry, in index order.
    pub fn traverse_array(&self, mut f: impl FnMut(usize, Inspector<'a>)) {
        if let Some((names, Value::Array(items))) = self.node {
            for (idx, item) in items.iter().enumerate() {
                f(idx, Inspector::new(names, item));
            }
        }
    }

    /// Call `f` once per object field, in insertion order.
    pub fn traverse_object(&self, mut f: impl FnMut(&'a str, Inspector<'a>)) {
        if let Some((names, Value::Object(map))) = self.node {
            for (symbol, value) in map.iter() {
                f(names.resolve(symbol).unwrap_or(""), Inspector::new(names, value));
            }
        }
    }

    /// Like [`traverse_object`](Self::traverse_object), but hands out symbols
    /// instead of resolving names.
    pub fn traverse_symbols(&self, mut f: impl FnMut(Symbol, Inspector<'a>)) {
        if let Some((names, Value::Object(map))) = self.node {
            for (symbol, value) in map.iter() {
                f(symbol, Inspector::new(names, value));
            }
        }
    }

    /// Array entries in index order; empty for non-arrays.
    pub fn entries(&self) -> impl Iterator<Item = Inspector<'a>> + 'a {
        let (names, items): (Option<&'a SymbolTable>, &'a [Value]) = match self.node {
            Some((names, Value::Array(items))) => (Some(names), items.as_slice()),
            _ => (None, &[]),
        };
        items
            .iter()
            .filter_map(move |item| names.map(|names| Inspector::new(names, item)))
    }

    /// Object fields in insertion order; empty for non-objects.
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, Inspector<'a>)> + 'a {
        let node = match self.node {
            Some((names, Value::Object(map))) => Some((names, map)),
            _ => None,
        };
        node.into_iter().flat_map(|(names, map)| {
            map.iter().map(move |(symbol, value)| {
                (names.resolve(symbol).unwrap_or(""), Inspector::new(names, value))
            })
        })
    }

    /// Dispatch to exactly one visitor method according to the type.
    ///
    /// Containers are handed to the visitor as inspectors; recursing into
    /// them is up to the visitor.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self.value() {
            None => visitor.visit_invalid(),
            Some(Value::Nix) => visitor.visit_nix(),
            Some(Value::Bool(value)) => visitor.visit_bool(*value),
            Some(Value::Long(value)) => visitor.visit_long(*value),
            Some(Value::Double(value)) => visitor.visit_double(*value),
            Some(Value::String(value)) => visitor.visit_string(value.as_str()),
            Some(Value::Data(value)) => visitor.visit_data(&value[..]),
            Some(Value::Array(_)) => visitor.visit_array(*self),
            Some(Value::Object(_)) => visitor.visit_object(*self),
        }
    }
}

impl Default for Inspector<'_> {
    fn default() -> Self {
        Inspector::invalid()
    }
}

/// Nesting below this depth contributes only its kind and size to a hash,
/// so hashing never recurses deeper than this regardless of tree depth.
const HASH_DEPTH: usize = 32;

/// Compares two subtrees with an explicit work stack, so deep trees cannot
/// exhaust the call stack.
fn values_equal(lhs: (&SymbolTable, &Value), rhs: (&SymbolTable, &Value)) -> bool {
    let ((lnames, lvalue), (rnames, rvalue)) = (lhs, rhs);
    let mut pending = vec![(lvalue, rvalue)];
    while let Some((lvalue, rvalue)) = pending.pop() {
        let same = match (lvalue, rvalue) {
            (Value::Nix, Value::Nix) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a.as_utf8() == b.as_utf8(),
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                pending.extend(a.iter().zip(b.iter()));
                a.len() == b.len()
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(symbol, a)| {
                        let other = lnames
                            .resolve(symbol)
                            .and_then(|name| rnames.lookup(name))
                            .and_then(|symbol| b.get(symbol));
                        match other {
                            Some(b) => {
                                pending.push((a, b));
                                true
                            }
                            None => false,
                        }
                    })
            }
            _ => false,
        };
        if !same {
            return false;
        }
    }
    true
}

fn hash_value<H: Hasher>(names: &SymbolTable, value: &Value, state: &mut H, depth: usize) {
    value.kind().hash(state);
    match value {
        Value::Nix => {}
        Value::Bool(value) => value.hash(state),
        Value::Long(value) => value.hash(state),
        Value::Double(value) => value.to_bits().hash(state),
        Value::String(value) => value.as_utf8().hash(state),
        Value::Data(value) => value.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            if depth < HASH_DEPTH {
                for item in items {
                    hash_value(names, item, state, depth + 1);
                }
            }
        }
        Value::Object(map) => {
            map.len().hash(state);
            if depth >= HASH_DEPTH {
                return;
            }
            // Field order does not take part in equality, so combine the
            // per-field hashes commutatively.
            let mut combined = 0u64;
            for (symbol, value) in map.iter() {
                let mut field = DefaultHasher::new();
                names.resolve(symbol).hash(&mut field);
                hash_value(names, value, &mut field, depth + 1);
                combined = combined.wrapping_add(field.finish());
            }
            combined.hash(state);
        }
    }
}

/// Structural equality: same types and contents. Objects compare by field
/// name regardless of insertion order or of which tree they belong to.
/// Doubles compare by bit pattern.
impl PartialEq for Inspector<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => values_equal(lhs, rhs),
            _ => false,
        }
    }
}

impl Eq for Inspector<'_> {}

impl Hash for Inspector<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.node {
            None => state.write_u8(0xff),
            Some((names, value)) => hash_value(names, value, state, 0),
        }
    }
}

impl fmt::Display for Inspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::json::to_value(*self))
    }
}

impl fmt::Debug for Inspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid() {
            write!(f, "Inspector({}: {})", self.kind(), self)
        } else {
            f.write_str("Inspector(invalid)")
        }
    }
}
