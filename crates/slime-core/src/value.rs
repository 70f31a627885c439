//! The tagged-union value model.
//!
//! A tree is a single [`Value`] owning all of its descendants. Leaves are
//! immutable once stored; arrays and objects only grow, through a
//! [`Cursor`](crate::Cursor).

use std::fmt;
use std::sync::OnceLock;

use crate::object::FieldMap;

/// Type tag reported by every value.
///
/// `Nix` is the empty type; it is also what an absent (invalid) slot reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Nix,
    Bool,
    Long,
    Double,
    String,
    Data,
    Array,
    Object,
}

impl Type {
    /// Upper-case tag name as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Type::Nix => "NIX",
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

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string leaf.
///
/// Strings set from text are stored as text and expose their UTF-8 bytes
/// directly. Strings set from raw UTF-8 bytes keep the bytes and decode to
/// text on first request; the decoded text is cached in a write-once cell so
/// concurrent readers of a finished tree may race on it harmlessly.
#[derive(Debug, Clone)]
pub(crate) enum StringValue {
    Text(Box<str>),
    Utf8 {
        bytes: Box<[u8]>,
        text: OnceLock<Box<str>>,
    },
}

impl StringValue {
    pub(crate) fn from_text(text: &str) -> Self {
        StringValue::Text(text.into())
    }

    pub(crate) fn from_utf8(bytes: &[u8]) -> Self {
        StringValue::Utf8 {
            bytes: bytes.into(),
            text: OnceLock::new(),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            StringValue::Text(text) => text,
            StringValue::Utf8 { bytes, text } => {
                text.get_or_init(|| String::from_utf8_lossy(bytes).into_owned().into_boxed_str())
            }
        }
    }

    pub(crate) fn as_utf8(&self) -> &[u8] {
        match self {
            StringValue::Text(text) => text.as_bytes(),
            StringValue::Utf8 { bytes, .. } => bytes,
        }
    }
}

/// One node of a tree.
#[derive(Debug, Clone, Default)]
pub(crate) enum Value {
    #[default]
    Nix,
    Bool(bool),
    Long(i64),
    Double(f64),
    String(StringValue),
    Data(Box<[u8]>),
    Array(Vec<Value>),
    Object(FieldMap<Value>),
}

impl Value {
    pub(crate) fn kind(&self) -> Type {
        match self {
            Value::Nix => Type::Nix,
            Value::Bool(_) => Type::Bool,
            Value::Long(_) => Type::Long,
            Value::Double(_) => Type::Double,
            Value::String(_) => Type::String,
            Value::Data(_) => Type::Data,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    pub(crate) fn string(text: &str) -> Self {
        Value::String(StringValue::from_text(text))
    }

    pub(crate) fn utf8(bytes: &[u8]) -> Self {
        Value::String(StringValue::from_utf8(bytes))
    }

    pub(crate) fn data(bytes: &[u8]) -> Self {
        Value::Data(bytes.into())
    }

    pub(crate) fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub(crate) fn object() -> Self {
        Value::Object(FieldMap::new())
    }
}
