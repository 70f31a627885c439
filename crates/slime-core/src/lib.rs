//! # slime-core
//!
//! A dynamic, self-describing value tree for "build once, read many times"
//! data interchange: config propagation, document payloads, RPC bodies.
//!
//! A [`Slime`] is a tree of eight value types (NIX, BOOL, LONG, DOUBLE,
//! STRING, DATA, ARRAY, OBJECT). Object field names are interned once per
//! tree in a [`SymbolTable`], and objects keep their fields in insertion
//! order. Trees are written through [`Cursor`]s and read through
//! [`Inspector`]s; missing values are never errors but *invalid* inspectors
//! that read as empty.
//!
//! ## Quick start
//!
//! ```rust
//! use slime_core::{Slime, Type};
//!
//! let mut slime = Slime::new();
//! let mut root = slime.set_object();
//! root.set_long("id", 7);
//! let mut tags = root.set_array("tags");
//! tags.add_string("fast");
//! tags.add_string("small");
//!
//! let root = slime.root();
//! assert_eq!(root.field("id").as_double().unwrap(), 7.0);
//! assert_eq!(root.field("tags").entry_count(), 2);
//! assert_eq!(root.field("tags").entry(5).kind(), Type::Nix);
//! assert_eq!(root.field("nope").as_long_or(-1), -1);
//! assert_eq!(slime.to_string(), r#"{"id":7,"tags":["fast","small"]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`symbol`]: field-name interning
//! - [`object`]: insertion-ordered symbol map backing OBJECT values
//! - [`cursor`]: write access
//! - [`inspector`]: read access and coercion rules
//! - [`visitor`]: type dispatch for encoders
//! - [`inserter`]: target-agnostic insertion for decoders
//! - [`json`]: JSON bridge via `serde_json`
//! - [`access`]: format-agnostic read access ([`access::DataInspector`])
//! - [`error`]: error types

pub mod access;
pub mod cursor;
pub mod error;
pub mod inserter;
pub mod inspector;
pub mod json;
pub mod object;
pub mod slime;
pub mod symbol;
pub mod value;
pub mod visitor;

pub use cursor::Cursor;
pub use error::{Result, SlimeError};
pub use inserter::{ArrayInserter, Inserter, ObjectInserter, ObjectSymbolInserter, SlimeInserter};
pub use inspector::Inspector;
pub use object::FieldMap;
pub use slime::Slime;
pub use symbol::{FieldKey, Symbol, SymbolTable};
pub use value::Type;
pub use visitor::Visitor;
