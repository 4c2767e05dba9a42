//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! A JSON round trip is not a deep copy: it flattens aliasing, and it has no
//! way to carry functions, cycles or non-finite numbers. Instead of
//! dropping those silently, [`Value::to_json`] fails on them. Nesting is
//! bounded by [`DEFAULT_MAX_DEPTH`], as in a default deep copy.
//!
//! Whole numbers in the `i64` range are written as JSON integers. Negative
//! zero and larger magnitudes are written as floats, so their value and sign
//! survive the round trip.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Number};

use crate::config::DEFAULT_MAX_DEPTH;
use crate::errors::{CopyError, CopyResult};
use crate::path::ValuePath;
use crate::value::{Mapping, Sequence, Value};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect::<Sequence>())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect::<Mapping>(),
            ),
        }
    }
}

impl Value {
    /// Parses a JSON document into a fresh value.
    ///
    /// # Errors
    ///
    /// Fails when `content` is not valid JSON.
    pub fn from_json_str(content: &str) -> serde_json::Result<Value> {
        serde_json::from_str::<serde_json::Value>(content).map(Value::from)
    }

    /// Converts to a JSON tree. A container reachable from several places
    /// is written out once per place.
    ///
    /// # Errors
    ///
    /// - [`CopyError::Unsupported`] for functions.
    /// - [`CopyError::Cycle`] for cyclic values.
    /// - [`CopyError::NonFiniteNumber`] for NaN and infinities.
    /// - [`CopyError::DepthExceeded`] when nesting passes
    ///   [`DEFAULT_MAX_DEPTH`].
    pub fn to_json(&self) -> CopyResult<serde_json::Value> {
        JsonWriter::default().write(self)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

#[derive(Default)]
struct JsonWriter {
    active: HashSet<usize>,
    path: ValuePath,
    depth: usize,
}

impl JsonWriter {
    fn write(&mut self, value: &Value) -> CopyResult<serde_json::Value> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => self.number(*n).map(serde_json::Value::Number),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Function(func) => Err(CopyError::Unsupported {
                path: self.path.clone(),
                kind: value.kind(),
                name: func.name().to_string(),
            }),
            Value::Array(seq) => self.guarded(seq.id(), |writer| {
                let items = seq.borrow();
                let mut written = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    writer.path.push_index(index);
                    let result = writer.write(item);
                    writer.path.pop();
                    written.push(result?);
                }
                Ok(serde_json::Value::Array(written))
            }),
            Value::Object(map) => self.guarded(map.id(), |writer| {
                let entries = map.borrow();
                let mut written = Map::with_capacity(entries.len());
                for (key, item) in entries.iter() {
                    writer.path.push_key(key);
                    let result = writer.write(item);
                    writer.path.pop();
                    written.insert(key.clone(), result?);
                }
                Ok(serde_json::Value::Object(written))
            }),
        }
    }

    fn guarded<F>(&mut self, id: usize, write: F) -> CopyResult<serde_json::Value>
    where
        F: FnOnce(&mut Self) -> CopyResult<serde_json::Value>,
    {
        if !self.active.insert(id) {
            return Err(CopyError::Cycle {
                path: self.path.clone(),
            });
        }
        if self.depth >= DEFAULT_MAX_DEPTH {
            self.active.remove(&id);
            return Err(CopyError::DepthExceeded {
                path: self.path.clone(),
                limit: DEFAULT_MAX_DEPTH,
            });
        }
        self.depth += 1;
        let written = write(self);
        self.depth -= 1;
        self.active.remove(&id);
        written
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn number(&self, n: f64) -> CopyResult<Number> {
        // Whole numbers are written without a fraction, as `1` rather than `1.0`.
        // `i64::MAX as f64` rounds up to 2^63, which does not fit an i64.
        let negative_zero = n == 0.0 && n.is_sign_negative();
        if n.fract() == 0.0 && !negative_zero && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            return Ok(Number::from(n as i64));
        }
        Number::from_f64(n).ok_or_else(|| CopyError::NonFiniteNumber {
            path: self.path.clone(),
        })
    }
}
