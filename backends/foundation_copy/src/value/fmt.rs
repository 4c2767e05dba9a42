use std::cell::RefCell;
use std::fmt::{Debug, Formatter, Result};

use super::Value;

/// Like [`PartialEq`] for [`Value`], printing recurses without a depth limit.
impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let active = RefCell::new(Vec::new());
        Guarded {
            value: self,
            active: &active,
        }
        .fmt(f)
    }
}

/// Prints a value while tracking the containers currently being printed, so
/// a container reached again through itself prints as `[Circular]`.
struct Guarded<'a> {
    value: &'a Value,
    active: &'a RefCell<Vec<usize>>,
}

impl Guarded<'_> {
    fn child<'b>(&'b self, value: &'b Value) -> Guarded<'b> {
        Guarded {
            value,
            active: self.active,
        }
    }
}

impl Debug for Guarded<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let Some(id) = self.value.container_id() else {
            return match self.value {
                Value::Null => f.write_str("null"),
                Value::Bool(b) => write!(f, "{b}"),
                Value::Number(n) => write!(f, "{n}"),
                Value::String(s) => write!(f, "{s:?}"),
                Value::Function(func) => write!(f, "{func:?}"),
                Value::Array(_) | Value::Object(_) => Ok(()),
            };
        };

        if self.active.borrow().contains(&id) {
            return f.write_str("[Circular]");
        }

        self.active.borrow_mut().push(id);
        let result = match self.value {
            Value::Array(seq) => f
                .debug_list()
                .entries(seq.borrow().iter().map(|item| self.child(item)))
                .finish(),
            Value::Object(map) => f
                .debug_map()
                .entries(map.borrow().iter().map(|(key, item)| (key, self.child(item))))
                .finish(),
            _ => Ok(()),
        };
        self.active.borrow_mut().pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::Value;

    #[test]
    fn test_debug_prints_nested_values_in_order() {
        let value = Value::object();
        value.set("name", "test").unwrap();
        value.set("items", vec![Value::from(1), Value::Null]).unwrap();

        assert_eq!(format!("{value:?}"), r#"{"name": "test", "items": [1, null]}"#);
    }

    #[test]
    fn test_debug_marks_cycles() {
        let value = Value::array();
        value.push(value.clone()).unwrap();

        assert_eq!(format!("{value:?}"), "[[Circular]]");
    }
}
