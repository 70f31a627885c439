//! Format-agnostic tree access.
//!
//! Application code that only needs to *read* structured data can be written
//! against [`DataInspector`] instead of a concrete representation. Two
//! backings are provided:
//!
//! - [`SlimeAdapter`] wraps a slime [`Inspector`](crate::Inspector).
//! - [`JsonAdapter`] wraps a parsed `serde_json::Value`.
//!
//! Both are thin per-node wrappers: `entry` and `field` build a new wrapper
//! for the child on demand and nothing below it is materialized.
//!
//! The strict accessors here are stricter than the slime inspector's: they
//! also fail on an *absent* value, and accept NIX only as the empty form of
//! the requested type. Default-valued accessors accept native types only.
//!
//! ```
//! use slime_core::access::{DataInspector, JsonAdapter, SlimeAdapter};
//! use slime_core::json;
//!
//! fn names<I: DataInspector>(people: &I) -> Vec<String> {
//!     people
//!         .entries()
//!         .iter()
//!         .map(|p| p.field("name").as_str_or("?").to_string())
//!         .collect()
//! }
//!
//! let text = r#"[{"name":"Alice"},{"name":"Bob"},{}]"#;
//! let slime = json::decode(text).unwrap();
//! let value: serde_json::Value = serde_json::from_str(text).unwrap();
//!
//! assert_eq!(names(&SlimeAdapter::new(slime.root())), ["Alice", "Bob", "?"]);
//! assert_eq!(names(&JsonAdapter::new(&value)), ["Alice", "Bob", "?"]);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, SlimeError};
use crate::inspector::Inspector;
use crate::value;

/// Type tag of the generic access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Empty,
    Bool,
    Long,
    Double,
    String,
    Data,
    Array,
    Object,
}

impl Type {
    pub const fn name(self) -> &'static str {
        match self {
            Type::Empty => "EMPTY",
            Type::Bool => "BOOL",
            Type::Long => "LONG",
            Type::Double => "DOUBLE",
            Type::String => "STRING",
            Type::Data => "DATA",
            Type::Array => "ARRAY",
            Type::Object => "OBJECT",
        }
    }
}

impl From<value::Type> for Type {
    fn from(kind: value::Type) -> Self {
        match kind {
            value::Type::Nix => Type::Empty,
            value::Type::Bool => Type::Bool,
            value::Type::Long => Type::Long,
            value::Type::Double => Type::Double,
            value::Type::String => Type::String,
            value::Type::Data => Type::Data,
            value::Type::Array => Type::Array,
            value::Type::Object => Type::Object,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only capability over one node of some structured-data tree.
pub trait DataInspector: Sized + Clone + PartialEq + Hash {
    fn valid(&self) -> bool;
    fn kind(&self) -> Type;
    fn entry_count(&self) -> usize;
    fn field_count(&self) -> usize;

    fn as_bool(&self) -> Result<bool>;
    fn as_long(&self) -> Result<i64>;
    fn as_double(&self) -> Result<f64>;
    fn as_str(&self) -> Result<&str>;
    fn as_utf8(&self) -> Result<&[u8]>;
    fn as_data(&self) -> Result<&[u8]>;

    fn as_bool_or(&self, default: bool) -> bool;
    fn as_long_or(&self, default: i64) -> i64;
    fn as_double_or(&self, default: f64) -> f64;
    fn as_str_or<'s>(&'s self, default: &'s str) -> &'s str;
    fn as_utf8_or<'s>(&'s self, default: &'s [u8]) -> &'s [u8];
    fn as_data_or<'s>(&'s self, default: &'s [u8]) -> &'s [u8];

    fn entry(&self, idx: usize) -> Self;
    fn field(&self, name: &str) -> Self;

    /// Call `f` once per array entry, in index order.
    fn traverse_array<F: FnMut(usize, Self)>(&self, f: F);

    /// Call `f` once per object field, in the backing's field order.
    fn traverse_object<F: FnMut(&str, Self)>(&self, f: F);

    /// Wrappers for all array entries, in order.
    fn entries(&self) -> Vec<Self> {
        let mut list = Vec::with_capacity(self.entry_count());
        self.traverse_array(|_, entry| list.push(entry));
        list
    }

    /// `(name, wrapper)` pairs for all object fields, in order.
    fn fields(&self) -> Vec<(String, Self)> {
        let mut list = Vec::with_capacity(self.field_count());
        self.traverse_object(|name, field| list.push((name.to_owned(), field)));
        list
    }
}

fn extraction_error(valid: bool, requested: &'static str, actual: Type) -> SlimeError {
    if valid {
        SlimeError::TypeMismatch {
            requested,
            actual: actual.name(),
        }
    } else {
        SlimeError::InvalidExtraction { requested }
    }
}

/// [`DataInspector`] over a slime tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlimeAdapter<'a> {
    inspector: Inspector<'a>,
}

impl<'a> SlimeAdapter<'a> {
    pub fn new(inspector: Inspector<'a>) -> Self {
        Self { inspector }
    }

    /// The wrapped slime inspector.
    pub fn inspector(&self) -> Inspector<'a> {
        self.inspector
    }

    fn verify(&self, accepted: &[value::Type]) -> bool {
        self.inspector.valid() && accepted.contains(&self.inspector.kind())
    }

    fn error(&self, requested: &'static str) -> SlimeError {
        extraction_error(self.inspector.valid(), requested, self.kind())
    }
}

impl DataInspector for SlimeAdapter<'_> {
    fn valid(&self) -> bool {
        self.inspector.valid()
    }

    fn kind(&self) -> Type {
        self.inspector.kind().into()
    }

    fn entry_count(&self) -> usize {
        self.inspector.entry_count()
    }

    fn field_count(&self) -> usize {
        self.inspector.field_count()
    }

    fn as_bool(&self) -> Result<bool> {
        if !self.verify(&[value::Type::Nix, value::Type::Bool]) {
            return Err(self.error("bool"));
        }
        self.inspector.as_bool()
    }

    fn as_long(&self) -> Result<i64> {
        if !self.verify(&[value::Type::Nix, value::Type::Long, value::Type::Double]) {
            return Err(self.error("long"));
        }
        self.inspector.as_long()
    }

    fn as_double(&self) -> Result<f64> {
        if !self.verify(&[value::Type::Nix, value::Type::Double, value::Type::Long]) {
            return Err(self.error("double"));
        }
        self.inspector.as_double()
    }

    fn as_str(&self) -> Result<&str> {
        if !self.verify(&[value::Type::Nix, value::Type::String]) {
            return Err(self.error("string"));
        }
        self.inspector.as_str()
    }

    fn as_utf8(&self) -> Result<&[u8]> {
        if !self.verify(&[value::Type::Nix, value::Type::String]) {
            return Err(self.error("utf8"));
        }
        self.inspector.as_utf8()
    }

    fn as_data(&self) -> Result<&[u8]> {
        if !self.verify(&[value::Type::Nix, value::Type::Data]) {
            return Err(self.error("data"));
        }
        self.inspector.as_data()
    }

    fn as_bool_or(&self, default: bool) -> bool {
        self.inspector.as_bool_or(default)
    }

    fn as_long_or(&self, default: i64) -> i64 {
        self.inspector.as_long_or(default)
    }

    fn as_double_or(&self, default: f64) -> f64 {
        self.inspector.as_double_or(default)
    }

    fn as_str_or<'s>(&'s self, default: &'s str) -> &'s str {
        self.inspector.as_str_or(default)
    }

    fn as_utf8_or<'s>(&'s self, default: &'s [u8]) -> &'s [u8] {
        self.inspector.as_utf8_or(default)
    }

    fn as_data_or<'s>(&'s self, default: &'s [u8]) -> &'s [u8] {
        self.inspector.as_data_or(default)
    }

    fn entry(&self, idx: usize) -> Self {
        SlimeAdapter::new(self.inspector.entry(idx))
    }

    fn field(&self, name: &str) -> Self {
        SlimeAdapter::new(self.inspector.field(name))
    }

    fn traverse_array<F: FnMut(usize, Self)>(&self, mut f: F) {
        self.inspector
            .traverse_array(|idx, entry| f(idx, SlimeAdapter::new(entry)));
    }

    fn traverse_object<F: FnMut(&str, Self)>(&self, mut f: F) {
        self.inspector
            .traverse_object(|name, field| f(name, SlimeAdapter::new(field)));
    }
}

impl fmt::Display for SlimeAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inspector, f)
    }
}

impl fmt::Debug for SlimeAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlimeAdapter").field(&self.inspector).finish()
    }
}

/// [`DataInspector`] over a parsed `serde_json::Value`.
///
/// JSON numbers that fit in `i64` report LONG, all others DOUBLE. JSON has
/// no DATA type, so `kind()` never reports it.
#[derive(Clone, Copy, PartialEq)]
pub struct JsonAdapter<'a> {
    value: Option<&'a serde_json::Value>,
}

impl<'a> JsonAdapter<'a> {
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value: Some(value) }
    }

    /// A wrapper that references nothing.
    pub const fn invalid() -> Self {
        Self { value: None }
    }

    fn wrap(value: Option<&'a serde_json::Value>) -> Self {
        Self { value }
    }

    fn error(&self, requested: &'static str) -> SlimeError {
        extraction_error(self.valid(), requested, self.kind())
    }
}

impl Eq for JsonAdapter<'_> {}

fn hash_json<H: Hasher>(value: &serde_json::Value, state: &mut H) {
    use serde_json::Value;

    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(value) => {
            state.write_u8(1);
            value.hash(state);
        }
        Value::Number(number) => {
            state.write_u8(2);
            number.to_string().hash(state);
        }
        Value::String(value) => {
            state.write_u8(3);
            value.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            items.len().hash(state);
            for item in items {
                hash_json(item, state);
            }
        }
        Value::Object(map) => {
            // serde_json maps compare without regard to order.
            state.write_u8(5);
            let mut combined = 0u64;
            for (name, item) in map {
                let mut field = DefaultHasher::new();
                name.hash(&mut field);
                hash_json(item, &mut field);
                combined = combined.wrapping_add(field.finish());
            }
            map.len().hash(state);
            combined.hash(state);
        }
    }
}

impl Hash for JsonAdapter<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.value {
            None => state.write_u8(0xff),
            Some(value) => hash_json(value, state),
        }
    }
}

impl DataInspector for JsonAdapter<'_> {
    fn valid(&self) -> bool {
        self.value.is_some()
    }

    fn kind(&self) -> Type {
        use serde_json::Value;

        match self.value {
            None | Some(Value::Null) => Type::Empty,
            Some(Value::Bool(_)) => Type::Bool,
            Some(Value::Number(number)) if number.is_i64() => Type::Long,
            Some(Value::Number(_)) => Type::Double,
            Some(Value::String(_)) => Type::String,
            Some(Value::Array(_)) => Type::Array,
            Some(Value::Object(_)) => Type::Object,
        }
    }

    fn entry_count(&self) -> usize {
        self.value
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len)
    }

    fn field_count(&self) -> usize {
        self.value
            .and_then(serde_json::Value::as_object)
            .map_or(0, serde_json::Map::len)
    }

    fn as_bool(&self) -> Result<bool> {
        use serde_json::Value;

        match self.value {
            Some(Value::Null) => Ok(false),
            Some(Value::Bool(value)) => Ok(*value),
            _ => Err(self.error("bool")),
        }
    }

    fn as_long(&self) -> Result<i64> {
        use serde_json::Value;

        match self.value {
            Some(Value::Null) => Ok(0),
            Some(Value::Number(number)) => Ok(number
                .as_i64()
                .unwrap_or_else(|| number.as_f64().unwrap_or_default() as i64)),
            _ => Err(self.error("long")),
        }
    }

    fn as_double(&self) -> Result<f64> {
        use serde_json::Value;

        match self.value {
            Some(Value::Null) => Ok(0.0),
            Some(Value::Number(number)) => Ok(number.as_f64().unwrap_or_default()),
            _ => Err(self.error("double")),
        }
    }

    fn as_str(&self) -> Result<&str> {
        use serde_json::Value;

        match self.value {
            Some(Value::Null) => Ok(""),
            Some(Value::String(value)) => Ok(value),
            _ => Err(self.error("string")),
        }
    }

    fn as_utf8(&self) -> Result<&[u8]> {
        use serde_json::Value;

        match self.value {
            Some(Value::Null) => Ok(&[]),
            Some(Value::String(value)) => Ok(value.as_bytes()),
            _ => Err(self.error("utf8")),
        }
    }

    fn as_data(&self) -> Result<&[u8]> {
        match self.value {
            Some(serde_json::Value::Null) => Ok(&[]),
            _ => Err(self.error("data")),
        }
    }

    fn as_bool_or(&self, default: bool) -> bool {
        self.value
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(default)
    }

    fn as_long_or(&self, default: i64) -> i64 {
        match self.value {
            Some(serde_json::Value::Number(_)) => self.as_long().unwrap_or(default),
            _ => default,
        }
    }

    fn as_double_or(&self, default: f64) -> f64 {
        self.value
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(default)
    }

    fn as_str_or<'s>(&'s self, default: &'s str) -> &'s str {
        self.value
            .and_then(serde_json::Value::as_str)
            .unwrap_or(default)
    }

    fn as_utf8_or<'s>(&'s self, default: &'s [u8]) -> &'s [u8] {
        self.value
            .and_then(serde_json::Value::as_str)
            .map_or(default, str::as_bytes)
    }

    fn as_data_or<'s>(&'s self, default: &'s [u8]) -> &'s [u8] {
        default
    }

    fn entry(&self, idx: usize) -> Self {
        JsonAdapter::wrap(self.value.and_then(|value| value.as_array()?.get(idx)))
    }

    fn field(&self, name: &str) -> Self {
        JsonAdapter::wrap(self.value.and_then(|value| value.as_object()?.get(name)))
    }

    fn traverse_array<F: FnMut(usize, Self)>(&self, mut f: F) {
        if let Some(items) = self.value.and_then(serde_json::Value::as_array) {
            for (idx, item) in items.iter().enumerate() {
                f(idx, JsonAdapter::new(item));
            }
        }
    }

    fn traverse_object<F: FnMut(&str, Self)>(&self, mut f: F) {
        if let Some(map) = self.value.and_then(serde_json::Value::as_object) {
            for (name, item) in map {
                f(name, JsonAdapter::new(item));
            }
        }
    }
}

impl fmt::Debug for JsonAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "JsonAdapter({value})"),
            None => f.write_str("JsonAdapter(invalid)"),
        }
    }
}
