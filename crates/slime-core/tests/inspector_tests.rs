//! Tests for the read side. The accessor sections walk every
//! (accessor, value type) combination, including NIX and absent slots.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use slime_core::{Inspector, Slime, SlimeError, Type};

/// One field per value type, plus nested containers.
fn all_types() -> Slime {
    let mut slime = Slime::new();
    let mut root = slime.set_object();
    root.set_nix("nix");
    root.set_bool("bool", true);
    root.set_long("long", 7);
    root.set_double("double", 7.9);
    root.set_string("string", "text");
    root.set_utf8("utf8", "bytes\u{00e9}".as_bytes());
    root.set_data("data", &[1, 2, 3]);
    {
        let mut arr = root.set_array("array");
        arr.add_long(10);
        arr.add_long(20);
    }
    root.set_object("object").set_long("inner", 1);
    slime
}

fn hash_of(inspector: Inspector<'_>) -> u64 {
    let mut hasher = DefaultHasher::new();
    inspector.hash(&mut hasher);
    hasher.finish()
}

fn assert_mismatch<T: std::fmt::Debug>(result: slime_core::Result<T>, field: &str) {
    match result {
        Err(SlimeError::TypeMismatch { .. }) => {}
        other => panic!("expected type mismatch for {field}, got {other:?}"),
    }
}

// ============================================================================
// Type reporting
// ============================================================================

#[test]
fn kind_reports_each_type() {
    let slime = all_types();
    let root = slime.root();
    let expected = [
        ("nix", Type::Nix),
        ("bool", Type::Bool),
        ("long", Type::Long),
        ("double", Type::Double),
        ("string", Type::String),
        ("utf8", Type::String),
        ("data", Type::Data),
        ("array", Type::Array),
        ("object", Type::Object),
        ("missing", Type::Nix),
    ];
    for (name, kind) in expected {
        assert_eq!(root.field(name).kind(), kind, "field {name}");
    }
    assert_eq!(root.kind(), Type::Object);
}

#[test]
fn valid_distinguishes_nix_from_absent() {
    let slime = all_types();
    let root = slime.root();
    assert!(root.field("nix").valid());
    assert!(!root.field("missing").valid());
    assert!(!Inspector::invalid().valid());
    assert!(!Inspector::default().valid());
}

#[test]
fn counts() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field_count(), 9);
    assert_eq!(root.entry_count(), 0);
    assert_eq!(root.children(), 9);
    assert_eq!(root.field("array").entry_count(), 2);
    assert_eq!(root.field("array").field_count(), 0);
    assert_eq!(root.field("array").children(), 2);
    assert_eq!(root.field("long").children(), 0);
    assert_eq!(root.field("missing").entry_count(), 0);
}

// ============================================================================
// Strict accessors
// ============================================================================

#[test]
fn strict_as_bool() {
    let slime = all_types();
    let root = slime.root();
    assert!(!root.field("nix").as_bool().unwrap());
    assert!(!root.field("missing").as_bool().unwrap());
    assert!(root.field("bool").as_bool().unwrap());
    for name in ["long", "double", "string", "utf8", "data", "array", "object"] {
        assert_mismatch(root.field(name).as_bool(), name);
    }
}

#[test]
fn strict_as_long() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("nix").as_long().unwrap(), 0);
    assert_eq!(root.field("missing").as_long().unwrap(), 0);
    assert_eq!(root.field("long").as_long().unwrap(), 7);
    assert_eq!(root.field("double").as_long().unwrap(), 7, "double truncates");
    for name in ["bool", "string", "utf8", "data", "array", "object"] {
        assert_mismatch(root.field(name).as_long(), name);
    }
}

#[test]
fn strict_as_double() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("nix").as_double().unwrap(), 0.0);
    assert_eq!(root.field("missing").as_double().unwrap(), 0.0);
    assert_eq!(root.field("long").as_double().unwrap(), 7.0, "long widens");
    assert_eq!(root.field("double").as_double().unwrap(), 7.9);
    for name in ["bool", "string", "utf8", "data", "array", "object"] {
        assert_mismatch(root.field(name).as_double(), name);
    }
}

#[test]
fn strict_as_str() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("nix").as_str().unwrap(), "");
    assert_eq!(root.field("missing").as_str().unwrap(), "");
    assert_eq!(root.field("string").as_str().unwrap(), "text");
    assert_eq!(root.field("utf8").as_str().unwrap(), "bytes\u{00e9}");
    for name in ["bool", "long", "double", "data", "array", "object"] {
        assert_mismatch(root.field(name).as_str(), name);
    }
}

#[test]
fn strict_as_utf8() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("nix").as_utf8().unwrap(), b"");
    assert_eq!(root.field("missing").as_utf8().unwrap(), b"");
    assert_eq!(root.field("string").as_utf8().unwrap(), b"text");
    assert_eq!(root.field("utf8").as_utf8().unwrap(), "bytes\u{00e9}".as_bytes());
    for name in ["bool", "long", "double", "data", "array", "object"] {
        assert_mismatch(root.field(name).as_utf8(), name);
    }
}

#[test]
fn strict_as_data() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("nix").as_data().unwrap(), b"");
    assert_eq!(root.field("missing").as_data().unwrap(), b"");
    assert_eq!(root.field("data").as_data().unwrap(), &[1, 2, 3]);
    for name in ["bool", "long", "double", "string", "utf8", "array", "object"] {
        assert_mismatch(root.field(name).as_data(), name);
    }
}

#[test]
fn mismatch_error_names_both_types() {
    let slime = all_types();
    let err = slime.root().field("string").as_long().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid data extraction: cannot read STRING as long"
    );
}

// ============================================================================
// Default-valued accessors
// ============================================================================

#[test]
fn default_as_bool() {
    let slime = all_types();
    let root = slime.root();
    assert!(root.field("bool").as_bool_or(false));
    for name in ["nix", "missing", "long", "double", "string", "utf8", "data", "array", "object"] {
        assert!(root.field(name).as_bool_or(true), "field {name}");
    }
}

#[test]
fn default_as_long() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("long").as_long_or(-1), 7);
    assert_eq!(root.field("double").as_long_or(-1), 7);
    for name in ["nix", "missing", "bool", "string", "utf8", "data", "array", "object"] {
        assert_eq!(root.field(name).as_long_or(-1), -1, "field {name}");
    }
}

#[test]
fn default_as_double() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("long").as_double_or(-1.5), 7.0);
    assert_eq!(root.field("double").as_double_or(-1.5), 7.9);
    for name in ["nix", "missing", "bool", "string", "utf8", "data", "array", "object"] {
        assert_eq!(root.field(name).as_double_or(-1.5), -1.5, "field {name}");
    }
}

#[test]
fn default_as_str() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("string").as_str_or("dflt"), "text");
    assert_eq!(root.field("utf8").as_str_or("dflt"), "bytes\u{00e9}");
    for name in ["nix", "missing", "bool", "long", "double", "data", "array", "object"] {
        assert_eq!(root.field(name).as_str_or("dflt"), "dflt", "field {name}");
    }
}

#[test]
fn default_as_utf8() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("string").as_utf8_or(b"dflt"), b"text");
    for name in ["nix", "missing", "bool", "long", "double", "data", "array", "object"] {
        assert_eq!(root.field(name).as_utf8_or(b"dflt"), b"dflt", "field {name}");
    }
}

#[test]
fn default_as_data() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("data").as_data_or(b"dflt"), &[1, 2, 3]);
    for name in ["nix", "missing", "bool", "long", "double", "string", "utf8", "array", "object"] {
        assert_eq!(root.field(name).as_data_or(b"dflt"), b"dflt", "field {name}");
    }
}

#[test]
fn nix_is_zero_for_strict_and_default_for_defaulted_on_same_slot() {
    let slime = all_types();
    let nix = slime.root().field("nix");
    assert_eq!(nix.as_long().unwrap(), 0);
    assert_eq!(nix.as_long_or(123), 123);
    assert!(!nix.as_bool().unwrap());
    assert!(nix.as_bool_or(true));
    assert_eq!(nix.as_str().unwrap(), "");
    assert_eq!(nix.as_str_or("x"), "x");
}

#[test]
fn numeric_cross_reads() {
    let mut slime = Slime::new();
    let mut arr = slime.set_array();
    arr.add_long(7);
    arr.add_double(7.9);
    arr.add_double(-7.9);

    let root = slime.root();
    assert_eq!(root.entry(0).as_double().unwrap(), 7.0);
    assert_eq!(root.entry(1).as_long().unwrap(), 7);
    assert_eq!(root.entry(2).as_long().unwrap(), -7, "truncation is toward zero");
}

#[test]
fn double_to_long_saturates() {
    let mut slime = Slime::new();
    let mut arr = slime.set_array();
    arr.add_double(1e300);
    arr.add_double(f64::NAN);
    let root = slime.root();
    assert_eq!(root.entry(0).as_long().unwrap(), i64::MAX);
    assert_eq!(root.entry(1).as_long().unwrap(), 0);
}

// ============================================================================
// Lookup misses
// ============================================================================

#[test]
fn out_of_range_entry_is_invalid_nix() {
    let slime = all_types();
    let array = slime.root().field("array");
    for idx in [2, 3, 100, usize::MAX] {
        let entry = array.entry(idx);
        assert!(!entry.valid());
        assert_eq!(entry.kind(), Type::Nix);
    }
}

#[test]
fn lookups_on_wrong_types_are_invalid() {
    let slime = all_types();
    let root = slime.root();
    assert!(!root.entry(0).valid(), "entry on object");
    assert!(!root.field("array").field("x").valid(), "field on array");
    assert!(!root.field("long").entry(0).valid(), "entry on leaf");
    assert!(!root.field("missing").field("deeper").entry(3).valid());
}

#[test]
fn lookup_by_unknown_name_does_not_intern() {
    let slime = all_types();
    let before = slime.symbols().len();
    assert!(!slime.root().field("never_seen").valid());
    assert_eq!(slime.symbols().len(), before);
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn traverse_object_in_insertion_order() {
    let slime = all_types();
    let mut names = Vec::new();
    slime.root().traverse_object(|name, _| names.push(name));
    assert_eq!(
        names,
        vec!["nix", "bool", "long", "double", "string", "utf8", "data", "array", "object"]
    );
}

#[test]
fn traverse_symbols_matches_names() {
    let slime = all_types();
    let mut pairs = Vec::new();
    slime
        .root()
        .traverse_symbols(|symbol, value| pairs.push((symbol, value.kind())));
    assert_eq!(pairs.len(), 9);
    assert_eq!(slime.symbol_name(pairs[2].0), Some("long"));
    assert_eq!(pairs[2].1, Type::Long);
}

#[test]
fn traverse_array_in_index_order() {
    let slime = all_types();
    let mut seen = Vec::new();
    slime
        .root()
        .field("array")
        .traverse_array(|idx, value| seen.push((idx, value.as_long().unwrap())));
    assert_eq!(seen, vec![(0, 10), (1, 20)]);
}

#[test]
fn traversal_of_wrong_type_is_a_no_op() {
    let slime = all_types();
    let root = slime.root();
    let mut calls = 0;
    root.traverse_array(|_, _| calls += 1);
    root.field("long").traverse_object(|_, _| calls += 1);
    root.field("missing").traverse_symbols(|_, _| calls += 1);
    assert_eq!(calls, 0);
    assert_eq!(root.entries().count(), 0);
    assert_eq!(root.field("array").fields().count(), 0);
}

#[test]
fn iterators_match_callbacks() {
    let slime = all_types();
    let root = slime.root();
    let longs: Vec<i64> = root
        .field("array")
        .entries()
        .map(|e| e.as_long().unwrap())
        .collect();
    assert_eq!(longs, vec![10, 20]);
    let (name, inner) = root.field("object").fields().next().expect("one field");
    assert_eq!(name, "inner");
    assert_eq!(inner.as_long().unwrap(), 1);
}

// ============================================================================
// Equality and hashing
// ============================================================================

#[test]
fn equal_trees_compare_equal_regardless_of_field_order() {
    let mut a = Slime::new();
    {
        let mut root = a.set_object();
        root.set_long("x", 1);
        root.set_string("y", "two");
    }
    let mut b = Slime::new();
    b.insert_symbol("unrelated");
    {
        let mut root = b.set_object();
        root.set_string("y", "two");
        root.set_long("x", 1);
    }
    assert_eq!(a.root(), b.root());
    assert_eq!(hash_of(a.root()), hash_of(b.root()));
    assert_eq!(a, b);
}

#[test]
fn different_values_compare_unequal() {
    let slime = all_types();
    let root = slime.root();
    assert_ne!(root.field("long"), root.field("double"));
    assert_ne!(root.field("nix"), root.field("missing"));
    assert_ne!(root.field("array"), root.field("object"));
    assert_eq!(root.field("missing"), Inspector::invalid());
}

#[test]
fn string_equality_ignores_representation() {
    let mut slime = Slime::new();
    let mut arr = slime.set_array();
    arr.add_string("same");
    arr.add_utf8(b"same");
    let root = slime.root();
    assert_eq!(root.entry(0), root.entry(1));
    assert_eq!(hash_of(root.entry(0)), hash_of(root.entry(1)));
}

/// `depth` objects nested around a LONG leaf.
fn nested(depth: usize, leaf: i64) -> Slime {
    let mut slime = Slime::new();
    slime.set_long(leaf);
    for level in 0..depth {
        slime.wrap(if level % 2 == 0 { "even" } else { "odd" });
    }
    slime
}

#[test]
fn deep_trees_compare_and_hash_structurally() {
    let a = nested(1_000, 7);
    let b = nested(1_000, 7);
    assert!(a.root() == b.root());
    assert_eq!(hash_of(a.root()), hash_of(b.root()));

    let differs_at_leaf = nested(1_000, 8);
    assert!(a.root() != differs_at_leaf.root());
    assert!(a.root() != nested(999, 7).root());
}

#[test]
fn hash_distinguishes_shallow_differences_in_deep_trees() {
    let mut a = nested(100, 1);
    let mut b = nested(100, 1);
    a.wrap("left");
    b.wrap("right");
    assert!(a.root() != b.root());
    assert_ne!(hash_of(a.root()), hash_of(b.root()));
}

// ============================================================================
// Display and concurrency
// ============================================================================

#[test]
fn display_renders_json() {
    let slime = all_types();
    let root = slime.root();
    assert_eq!(root.field("array").to_string(), "[10,20]");
    assert_eq!(root.field("data").to_string(), r#""0x010203""#);
    assert_eq!(format!("{:?}", root.field("long")), "Inspector(LONG: 7)");
    assert_eq!(format!("{:?}", root.field("missing")), "Inspector(invalid)");
}

#[test]
fn finished_tree_is_readable_from_many_threads() {
    let slime = all_types();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let root = slime.root();
                assert_eq!(root.field("utf8").as_str().unwrap(), "bytes\u{00e9}");
                assert_eq!(root.field("array").entry(1).as_long().unwrap(), 20);
            });
        }
    });
}
