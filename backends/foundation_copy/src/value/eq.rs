use std::collections::HashSet;

use super::{Mapping, Sequence, Value};

/// Structural equality.
///
/// Object equality ignores key order. A pair of containers that is already
/// being compared further up the descent is taken as equal, which makes
/// comparison of cyclic values terminate.
///
/// The descent has no depth limit. Values nested deeper than the stack
/// allows overflow it here; [`crate::Copier::deep_copy`] and
/// [`Value::to_json`] are the bounded walks.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        StructuralEq::default().values(self, other)
    }
}

#[derive(Default)]
struct StructuralEq {
    assumed: HashSet<(usize, usize)>,
}

impl StructuralEq {
    fn values(&mut self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => self.sequences(a, b),
            (Value::Object(a), Value::Object(b)) => self.mappings(a, b),
            _ => false,
        }
    }

    fn sequences(&mut self, left: &Sequence, right: &Sequence) -> bool {
        if left.ptr_eq(right) || !self.assumed.insert((left.id(), right.id())) {
            return true;
        }

        let (left, right) = (left.borrow(), right.borrow());
        left.len() == right.len()
            && left
                .iter()
                .zip(right.iter())
                .all(|(a, b)| self.values(a, b))
    }

    fn mappings(&mut self, left: &Mapping, right: &Mapping) -> bool {
        if left.ptr_eq(right) || !self.assumed.insert((left.id(), right.id())) {
            return true;
        }

        let (left, right) = (left.borrow(), right.borrow());
        left.len() == right.len()
            && left.iter().all(|(key, a)| match right.get(key) {
                Some(b) => self.values(a, b),
                None => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::Value;

    #[test]
    fn test_object_equality_ignores_key_order() {
        let first = Value::object();
        first.set("a", 1).unwrap();
        first.set("b", 2).unwrap();

        let second = Value::object();
        second.set("b", 2).unwrap();
        second.set("a", 1).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_cyclic_values_compare_without_overflow() {
        let first = Value::object();
        first.set("me", first.clone()).unwrap();

        let second = Value::object();
        second.set("me", second.clone()).unwrap();

        assert_eq!(first, second);

        second.set("extra", true).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }
}
