//! Type dispatch for encoders.
//!
//! [`Inspector::accept`](crate::Inspector::accept) calls exactly one method of
//! a [`Visitor`], chosen by the value's type, so encoders never need to test
//! types themselves. Array and object methods receive the container as an
//! inspector; whether and in what order to descend is the visitor's choice.
//!
//! ```
//! use slime_core::{Inspector, Slime, Visitor};
//!
//! #[derive(Default)]
//! struct LongSum(i64);
//!
//! impl Visitor for LongSum {
//!     fn visit_long(&mut self, value: i64) {
//!         self.0 += value;
//!     }
//!     fn visit_array(&mut self, array: Inspector<'_>) {
//!         array.traverse_array(|_, entry| entry.accept(self));
//!     }
//! }
//!
//! let mut slime = Slime::new();
//! let mut array = slime.set_array();
//! array.add_long(2);
//! array.add_string("skip");
//! array.add_long(5);
//!
//! let mut sum = LongSum::default();
//! slime.root().accept(&mut sum);
//! assert_eq!(sum.0, 7);
//! ```

use crate::inspector::Inspector;

/// One method per type tag, plus one for an absent slot.
///
/// Every method has an empty default so visitors only implement what they
/// care about.
pub trait Visitor {
    /// The inspector referenced nothing.
    fn visit_invalid(&mut self) {}

    fn visit_nix(&mut self) {}

    fn visit_bool(&mut self, _value: bool) {}

    fn visit_long(&mut self, _value: i64) {}

    fn visit_double(&mut self, _value: f64) {}

    fn visit_string(&mut self, _value: &str) {}

    fn visit_data(&mut self, _value: &[u8]) {}

    fn visit_array(&mut self, _array: Inspector<'_>) {}

    fn visit_object(&mut self, _object: Inspector<'_>) {}
}
