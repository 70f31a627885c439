//! Bridge between slime trees and JSON, via `serde_json`.
//!
//! Decoding builds trees purely through [`Inserter`]s and cursors; encoding
//! reads them purely through inspectors and a [`Visitor`]. Neither side
//! touches the tree's internals.
//!
//! # Type mapping
//!
//! | JSON                     | slime            |
//! |--------------------------|------------------|
//! | `null`                   | NIX              |
//! | `true` / `false`         | BOOL             |
//! | number fitting `i64`     | LONG             |
//! | any other number         | DOUBLE           |
//! | string                   | STRING           |
//! | array                    | ARRAY            |
//! | object                   | OBJECT           |
//!
//! Encoding maps back the same way. DATA has no JSON counterpart and is
//! written as a `"0x"`-prefixed lowercase hex string; NaN and infinities are
//! written as `null`, as is an invalid inspector.
//!
//! [`decode`] streams the text straight into cursors, so a key repeated
//! within one JSON object keeps its first value like any other duplicate
//! insert. A parsed `serde_json::Value` has already merged repeated keys
//! (last one wins) before [`from_value`] sees it.
//!
//! Decoding is limited to 128 levels of nesting by `serde_json`. Encoding
//! recurses once per level, so trees built through cursors to a depth of
//! many thousands can exhaust the stack in [`to_value`] and [`encode`].
//!
//! # Example
//! ```
//! use slime_core::json;
//!
//! let slime = json::decode(r#"{"name":"Alice","scores":[95,87.5]}"#).unwrap();
//! let root = slime.root();
//! assert_eq!(root.field("name").as_str().unwrap(), "Alice");
//! assert_eq!(root.field("scores").entry(1).as_double().unwrap(), 87.5);
//! assert_eq!(json::encode(root), r#"{"name":"Alice","scores":[95,87.5]}"#);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess};
use serde_json::{Map, Number, Value};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::inserter::{ArrayInserter, Inserter, ObjectInserter, SlimeInserter};
use crate::inspector::Inspector;
use crate::slime::Slime;
use crate::visitor::Visitor;

/// Parse a JSON document into a new tree.
pub fn decode(json: &str) -> Result<Slime> {
    let mut slime = Slime::new();
    decode_into(json, SlimeInserter::new(&mut slime))?;
    tracing::debug!(
        bytes = json.len(),
        symbols = slime.symbols().len(),
        "decoded JSON into slime"
    );
    Ok(slime)
}

/// Parse a JSON document and store it at the destination described by
/// `inserter`.
///
/// Returns a cursor on the stored value; invalid if the destination refused
/// it. The whole document is parsed either way.
pub fn decode_into<'a>(json: &str, inserter: impl Inserter<'a>) -> Result<Cursor<'a>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let cursor = InsertSeed::new(inserter).deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(cursor)
}

/// Deserializes one JSON value into an [`Inserter`]'s destination.
struct InsertSeed<'a, I> {
    inserter: I,
    cursor: PhantomData<Cursor<'a>>,
}

impl<'a, I: Inserter<'a>> InsertSeed<'a, I> {
    fn new(inserter: I) -> Self {
        Self {
            inserter,
            cursor: PhantomData,
        }
    }
}

impl<'de, 'a, I: Inserter<'a>> DeserializeSeed<'de> for InsertSeed<'a, I> {
    type Value = Cursor<'a>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'a, I: Inserter<'a>> de::Visitor<'de> for InsertSeed<'a, I> {
    type Value = Cursor<'a>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(self.inserter.insert_nix())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(self.inserter.insert_nix())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Self::Value, E> {
        Ok(self.inserter.insert_bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Self::Value, E> {
        Ok(self.inserter.insert_long(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
        Ok(match i64::try_from(value) {
            Ok(value) => self.inserter.insert_long(value),
            Err(_) => self.inserter.insert_double(value as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Self::Value, E> {
        Ok(self.inserter.insert_double(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(self.inserter.insert_string(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut cursor = self.inserter.insert_array();
        while seq
            .next_element_seed(InsertSeed::new(ArrayInserter::new(&mut cursor)))?
            .is_some()
        {}
        Ok(cursor)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut cursor = self.inserter.insert_object();
        while let Some(name) = map.next_key::<String>()? {
            // A repeated key is refused by the cursor; its value is still
            // consumed so parsing can continue.
            map.next_value_seed(InsertSeed::new(ObjectInserter::new(
                &mut cursor,
                name.as_str(),
            )))?;
        }
        Ok(cursor)
    }
}

/// Build a new tree from an already parsed JSON value.
pub fn from_value(value: &Value) -> Slime {
    let mut slime = Slime::new();
    insert_value(value, SlimeInserter::new(&mut slime));
    slime
}

/// Store `value` (recursively) at the destination described by `inserter`.
///
/// Returns a cursor on the stored value; invalid if the destination refused
/// it, in which case none of `value`'s children are stored either.
pub fn insert_value<'a>(value: &Value, inserter: impl Inserter<'a>) -> Cursor<'a> {
    match value {
        Value::Null => inserter.insert_nix(),
        Value::Bool(value) => inserter.insert_bool(*value),
        Value::Number(number) => match number.as_i64() {
            Some(value) => inserter.insert_long(value),
            None => inserter.insert_double(number.as_f64().unwrap_or_default()),
        },
        Value::String(value) => inserter.insert_string(value),
        Value::Array(items) => {
            let mut cursor = inserter.insert_array();
            for item in items {
                insert_value(item, ArrayInserter::new(&mut cursor));
            }
            cursor
        }
        Value::Object(map) => {
            let mut cursor = inserter.insert_object();
            for (name, item) in map {
                insert_value(item, ObjectInserter::new(&mut cursor, name.as_str()));
            }
            cursor
        }
    }
}

/// Collects one inspector's value as a `serde_json::Value`.
#[derive(Default)]
struct JsonBuilder {
    value: Value,
}

impl Visitor for JsonBuilder {
    fn visit_invalid(&mut self) {
        self.value = Value::Null;
    }

    fn visit_nix(&mut self) {
        self.value = Value::Null;
    }

    fn visit_bool(&mut self, value: bool) {
        self.value = Value::Bool(value);
    }

    fn visit_long(&mut self, value: i64) {
        self.value = Value::Number(value.into());
    }

    fn visit_double(&mut self, value: f64) {
        self.value = Number::from_f64(value).map_or(Value::Null, Value::Number);
    }

    fn visit_string(&mut self, value: &str) {
        self.value = Value::String(value.to_owned());
    }

    fn visit_data(&mut self, value: &[u8]) {
        self.value = Value::String(format!("0x{}", hex::encode(value)));
    }

    fn visit_array(&mut self, array: Inspector<'_>) {
        self.value = Value::Array(array.entries().map(to_value).collect());
    }

    fn visit_object(&mut self, object: Inspector<'_>) {
        let mut map = Map::with_capacity(object.field_count());
        object.traverse_object(|name, field| {
            map.insert(name.to_owned(), to_value(field));
        });
        self.value = Value::Object(map);
    }
}

/// Convert the value an inspector points at into a `serde_json::Value`.
///
/// Object fields keep their insertion order.
pub fn to_value(inspector: Inspector<'_>) -> Value {
    let mut builder = JsonBuilder::default();
    inspector.accept(&mut builder);
    builder.value
}

/// Compact JSON text for the value an inspector points at.
pub fn encode(inspector: Inspector<'_>) -> String {
    to_value(inspector).to_string()
}

/// Indented JSON text for the value an inspector points at.
pub fn encode_pretty(inspector: Inspector<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(inspector))?)
}
