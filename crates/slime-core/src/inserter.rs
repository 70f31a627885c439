//! Target-agnostic insertion.
//!
//! Decoders produce values without knowing where they go: the tree root, the
//! next array entry, or a named object field. An [`Inserter`] captures that
//! destination so one decoding routine serves all three.

use crate::cursor::Cursor;
use crate::slime::Slime;
use crate::symbol::{FieldKey, Symbol};

/// A destination for exactly one value.
///
/// Each method consumes the inserter, stores one value, and returns a cursor
/// on it (invalid if the destination refused the value).
pub trait Inserter<'a>: Sized {
    fn insert_nix(self) -> Cursor<'a>;
    fn insert_bool(self, value: bool) -> Cursor<'a>;
    fn insert_long(self, value: i64) -> Cursor<'a>;
    fn insert_double(self, value: f64) -> Cursor<'a>;
    fn insert_string(self, value: &str) -> Cursor<'a>;
    fn insert_utf8(self, value: &[u8]) -> Cursor<'a>;
    fn insert_data(self, value: &[u8]) -> Cursor<'a>;
    fn insert_array(self) -> Cursor<'a>;
    fn insert_object(self) -> Cursor<'a>;
}

/// Replaces the root of a tree.
pub struct SlimeInserter<'a> {
    slime: &'a mut Slime,
}

impl<'a> SlimeInserter<'a> {
    pub fn new(slime: &'a mut Slime) -> Self {
        Self { slime }
    }
}

impl<'a> Inserter<'a> for SlimeInserter<'a> {
    fn insert_nix(self) -> Cursor<'a> {
        self.slime.set_nix()
    }
    fn insert_bool(self, value: bool) -> Cursor<'a> {
        self.slime.set_bool(value)
    }
    fn insert_long(self, value: i64) -> Cursor<'a> {
        self.slime.set_long(value)
    }
    fn insert_double(self, value: f64) -> Cursor<'a> {
        self.slime.set_double(value)
    }
    fn insert_string(self, value: &str) -> Cursor<'a> {
        self.slime.set_string(value)
    }
    fn insert_utf8(self, value: &[u8]) -> Cursor<'a> {
        self.slime.set_utf8(value)
    }
    fn insert_data(self, value: &[u8]) -> Cursor<'a> {
        self.slime.set_data(value)
    }
    fn insert_array(self) -> Cursor<'a> {
        self.slime.set_array()
    }
    fn insert_object(self) -> Cursor<'a> {
        self.slime.set_object()
    }
}

/// Appends to the array a cursor points at.
pub struct ArrayInserter<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
}

impl<'c, 'a> ArrayInserter<'c, 'a> {
    pub fn new(cursor: &'c mut Cursor<'a>) -> Self {
        Self { cursor }
    }
}

impl<'c, 'a: 'c> Inserter<'c> for ArrayInserter<'c, 'a> {
    fn insert_nix(self) -> Cursor<'c> {
        self.cursor.add_nix()
    }
    fn insert_bool(self, value: bool) -> Cursor<'c> {
        self.cursor.add_bool(value)
    }
    fn insert_long(self, value: i64) -> Cursor<'c> {
        self.cursor.add_long(value)
    }
    fn insert_double(self, value: f64) -> Cursor<'c> {
        self.cursor.add_double(value)
    }
    fn insert_string(self, value: &str) -> Cursor<'c> {
        self.cursor.add_string(value)
    }
    fn insert_utf8(self, value: &[u8]) -> Cursor<'c> {
        self.cursor.add_utf8(value)
    }
    fn insert_data(self, value: &[u8]) -> Cursor<'c> {
        self.cursor.add_data(value)
    }
    fn insert_array(self) -> Cursor<'c> {
        self.cursor.add_array()
    }
    fn insert_object(self) -> Cursor<'c> {
        self.cursor.add_object()
    }
}

/// Inserts into the object a cursor points at, under a fixed key.
pub struct ObjectInserter<'c, 'a, K> {
    cursor: &'c mut Cursor<'a>,
    key: K,
}

/// An [`ObjectInserter`] addressing the field by pre-resolved symbol.
pub type ObjectSymbolInserter<'c, 'a> = ObjectInserter<'c, 'a, Symbol>;

impl<'c, 'a, K: FieldKey> ObjectInserter<'c, 'a, K> {
    pub fn new(cursor: &'c mut Cursor<'a>, key: K) -> Self {
        Self { cursor, key }
    }
}

impl<'c, 'a: 'c, K: FieldKey> Inserter<'c> for ObjectInserter<'c, 'a, K> {
    fn insert_nix(self) -> Cursor<'c> {
        self.cursor.set_nix(self.key)
    }
    fn insert_bool(self, value: bool) -> Cursor<'c> {
        self.cursor.set_bool(self.key, value)
    }
    fn insert_long(self, value: i64) -> Cursor<'c> {
        self.cursor.set_long(self.key, value)
    }
    fn insert_double(self, value: f64) -> Cursor<'c> {
        self.cursor.set_double(self.key, value)
    }
    fn insert_string(self, value: &str) -> Cursor<'c> {
        self.cursor.set_string(self.key, value)
    }
    fn insert_utf8(self, value: &[u8]) -> Cursor<'c> {
        self.cursor.set_utf8(self.key, value)
    }
    fn insert_data(self, value: &[u8]) -> Cursor<'c> {
        self.cursor.set_data(self.key, value)
    }
    fn insert_array(self) -> Cursor<'c> {
        self.cursor.set_array(self.key)
    }
    fn insert_object(self) -> Cursor<'c> {
        self.cursor.set_object(self.key)
    }
}
