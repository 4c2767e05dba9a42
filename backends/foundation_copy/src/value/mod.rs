//! Dynamic plain-data values.
//!
//! Scalars are owned data. Arrays and objects are handles to shared,
//! interior-mutable containers, so cloning a [`Value`] that holds a
//! container aliases it rather than duplicating it. This is the reference
//! model the copy operations in [`crate::copier`] work against.

mod eq;
mod fmt;
mod function;
mod mapping;
mod sequence;

pub use function::Function;
pub use mapping::{Entries, Mapping};
pub use sequence::Sequence;

use crate::errors::{CopyError, CopyResult};

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Sequence),
    Object(Mapping),
    Function(Function),
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValueKind {
    #[display("null")]
    Null,
    #[display("bool")]
    Bool,
    #[display("number")]
    Number,
    #[display("string")]
    String,
    #[display("array")]
    Array,
    #[display("object")]
    Object,
    #[display("function")]
    Function,
}

impl Value {
    /// A new, empty object.
    pub fn object() -> Self {
        Value::Object(Mapping::new())
    }

    /// A new, empty array.
    pub fn array() -> Self {
        Value::Array(Sequence::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Function(_) => ValueKind::Function,
        }
    }

    /// Arrays and objects are containers; everything else is not.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Array(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Object entry lookup; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Array element lookup; `None` when out of range or not an array.
    pub fn at(&self, index: usize) -> Option<Value> {
        self.as_sequence().and_then(|seq| seq.at(index))
    }

    /// Binds `key` on an object, returning the previous binding.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> CopyResult<Option<Value>> {
        match self {
            Value::Object(map) => Ok(map.insert(key, value)),
            other => Err(CopyError::KindMismatch {
                expected: ValueKind::Object,
                found: other.kind(),
            }),
        }
    }

    /// Appends to an array.
    pub fn push(&self, value: impl Into<Value>) -> CopyResult<()> {
        match self {
            Value::Array(seq) => {
                seq.push(value);
                Ok(())
            }
            other => Err(CopyError::KindMismatch {
                expected: ValueKind::Array,
                found: other.kind(),
            }),
        }
    }

    /// Number of top-level entries of a container; `None` for non-containers.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(seq) => Some(seq.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// True for containers with no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Object keys in insertion order; empty for anything else.
    pub fn keys(&self) -> Vec<String> {
        self.as_mapping().map(Mapping::keys).unwrap_or_default()
    }

    /// True when both values are the same container (or function) instance.
    /// Scalars have no identity and never compare as the same instance.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub(crate) fn container_id(&self) -> Option<usize> {
        match self {
            Value::Array(seq) => Some(seq.id()),
            Value::Object(map) => Some(map.id()),
            _ => None,
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(f64::from(n))
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Object(map)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Array(seq)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
