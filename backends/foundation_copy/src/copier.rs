//! Shallow copy, deep copy and move over [`Value`]s.
//!
//! - [`shallow_copy`] duplicates one level: the result is a new container
//!   whose container entries are the very instances held by the source.
//! - [`deep_copy`] duplicates every level: no container in the result is
//!   shared with the source. Aliasing *within* the source is reproduced, so
//!   a container reachable twice in the source is one new container
//!   reachable twice in the copy.
//! - [`move_out`] deep-copies a container and then empties it in place. It
//!   is the only operation here that mutates its argument.

use std::collections::{HashMap, HashSet};

use crate::config::{CopyConfig, CyclePolicy, UnsupportedPolicy};
use crate::errors::{CopyError, CopyResult};
use crate::path::ValuePath;
use crate::value::{Entries, Function, Mapping, Sequence, Value, ValueKind};

/// Copier runs the copy operations under a [`CopyConfig`].
#[derive(Debug, Clone, Default)]
pub struct Copier {
    config: CopyConfig,
}

impl Copier {
    pub fn new(config: CopyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// One-level duplication. Scalars come back as they are since they have
    /// no identity to duplicate.
    pub fn shallow_copy(&self, source: &Value) -> Value {
        tracing::debug!("Shallow copying a value of kind: {}", source.kind());
        match source {
            Value::Object(map) => Value::Object(map.with(|entries| Mapping::from(entries.clone()))),
            Value::Array(seq) => Value::Array(Sequence::from(seq.to_vec())),
            other => other.clone(),
        }
    }

    /// Full recursive duplication of `source`.
    ///
    /// # Errors
    ///
    /// - [`CopyError::Unsupported`] for a [`Function`] under
    ///   [`UnsupportedPolicy::Reject`].
    /// - [`CopyError::Cycle`] for a cycle under [`CyclePolicy::Reject`].
    /// - [`CopyError::DepthExceeded`] when nesting passes `max_depth`.
    ///
    /// `source` is never modified, whether or not the copy succeeds.
    ///
    /// Under [`CyclePolicy::Preserve`] a cyclic source gives a cyclic copy.
    /// Its containers hold `Rc`s to each other, so they are never freed
    /// until a caller breaks the cycle, for instance by clearing one of them.
    pub fn deep_copy(&self, source: &Value) -> CopyResult<Value> {
        tracing::debug!("Deep copying a value of kind: {}", source.kind());
        let mut walker = DeepCopy::new(&self.config);
        // Only entries are ever omitted, never the root.
        match walker.copy(source, 0)? {
            Some(copied) => Ok(copied),
            None => Err(walker.unsupported(source)),
        }
    }

    /// Deep-copies `source` and then removes all of its top-level entries,
    /// leaving an empty container of the same kind. Arrays are truncated to
    /// length zero.
    ///
    /// # Errors
    ///
    /// [`CopyError::NotAContainer`] for scalars and functions, plus anything
    /// [`Copier::deep_copy`] fails with. On error `source` is left untouched.
    pub fn move_out(&self, source: &Value) -> CopyResult<Value> {
        let moved = match source {
            Value::Object(_) | Value::Array(_) => self.deep_copy(source)?,
            other => return Err(CopyError::NotAContainer { kind: other.kind() }),
        };

        match source {
            Value::Object(map) => {
                tracing::debug!("Moved {} entries out of object", map.len());
                map.clear();
            }
            Value::Array(seq) => {
                tracing::debug!("Moved {} elements out of array", seq.len());
                seq.clear();
            }
            _ => {}
        }

        Ok(moved)
    }

    /// Copies the top-level entries of every source object onto `target`, in
    /// order, with later sources overwriting earlier keys. Container entries
    /// are aliased exactly as in [`Copier::shallow_copy`].
    ///
    /// # Errors
    ///
    /// [`CopyError::KindMismatch`] when `target` or any source is not an
    /// object. Nothing is written in that case.
    pub fn assign(&self, target: &Value, sources: &[Value]) -> CopyResult<()> {
        let target_map = expect_object(target)?;
        let source_maps = sources
            .iter()
            .map(expect_object)
            .collect::<CopyResult<Vec<_>>>()?;

        tracing::debug!("Assigning {} sources onto object", source_maps.len());
        for source in source_maps {
            if source.ptr_eq(target_map) {
                continue;
            }
            for (key, value) in source.entries() {
                target_map.insert(key, value);
            }
        }
        Ok(())
    }
}

fn expect_object(value: &Value) -> CopyResult<&Mapping> {
    value.as_mapping().ok_or(CopyError::KindMismatch {
        expected: ValueKind::Object,
        found: value.kind(),
    })
}

/// State for a single deep copy.
struct DeepCopy<'a> {
    config: &'a CopyConfig,
    // source container id -> its copy
    copies: HashMap<usize, Value>,
    // containers on the current descent
    active: HashSet<usize>,
    path: ValuePath,
}

impl<'a> DeepCopy<'a> {
    fn new(config: &'a CopyConfig) -> Self {
        Self {
            config,
            copies: HashMap::new(),
            active: HashSet::new(),
            path: ValuePath::root(),
        }
    }

    /// Returns `None` when the value is dropped under
    /// [`UnsupportedPolicy::Omit`].
    fn copy(&mut self, value: &Value, depth: usize) -> CopyResult<Option<Value>> {
        match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Ok(Some(value.clone()))
            }
            Value::Function(func) => self.copy_function(func),
            Value::Array(seq) => self.copy_container(seq.id(), depth, |walker| {
                walker.copy_sequence(seq, depth)
            }),
            Value::Object(map) => self.copy_container(map.id(), depth, |walker| {
                walker.copy_mapping(map, depth)
            }),
        }
    }

    fn copy_function(&self, func: &Function) -> CopyResult<Option<Value>> {
        match self.config.unsupported {
            UnsupportedPolicy::Reject => Err(self.unsupported(&Value::Function(func.clone()))),
            UnsupportedPolicy::Omit => {
                tracing::warn!(
                    "Omitting function `{}` at {} from deep copy",
                    func.name(),
                    self.path
                );
                Ok(None)
            }
        }
    }

    fn unsupported(&self, value: &Value) -> CopyError {
        CopyError::Unsupported {
            path: self.path.clone(),
            kind: value.kind(),
            name: value
                .as_function()
                .map(|func| func.name().to_string())
                .unwrap_or_default(),
        }
    }

    fn copy_container<F>(&mut self, id: usize, depth: usize, fill: F) -> CopyResult<Option<Value>>
    where
        F: FnOnce(&mut Self) -> CopyResult<Value>,
    {
        if let Some(existing) = self.copies.get(&id) {
            if self.active.contains(&id) && self.config.cycles == CyclePolicy::Reject {
                return Err(CopyError::Cycle {
                    path: self.path.clone(),
                });
            }
            return Ok(Some(existing.clone()));
        }

        if depth >= self.config.max_depth {
            return Err(CopyError::DepthExceeded {
                path: self.path.clone(),
                limit: self.config.max_depth,
            });
        }

        self.active.insert(id);
        let copied = fill(self);
        self.active.remove(&id);
        copied.map(Some)
    }

    fn copy_sequence(&mut self, source: &Sequence, depth: usize) -> CopyResult<Value> {
        let target = Sequence::new();
        self.copies.insert(source.id(), Value::Array(target.clone()));

        let items = source.borrow();
        for (index, item) in items.iter().enumerate() {
            self.path.push_index(index);
            let copied = self.copy(item, depth + 1);
            self.path.pop();
            if let Some(copied) = copied? {
                target.push(copied);
            }
        }

        Ok(Value::Array(target))
    }

    fn copy_mapping(&mut self, source: &Mapping, depth: usize) -> CopyResult<Value> {
        let target = Mapping::from(Entries::with_capacity(source.len()));
        self.copies.insert(source.id(), Value::Object(target.clone()));

        let entries = source.borrow();
        for (key, item) in entries.iter() {
            self.path.push_key(key);
            let copied = self.copy(item, depth + 1);
            self.path.pop();
            if let Some(copied) = copied? {
                target.insert(key.clone(), copied);
            }
        }

        Ok(Value::Object(target))
    }
}

/// [`Copier::shallow_copy`] with the default configuration.
pub fn shallow_copy(source: &Value) -> Value {
    Copier::default().shallow_copy(source)
}

/// [`Copier::deep_copy`] with the default configuration.
///
/// # Errors
///
/// See [`Copier::deep_copy`].
pub fn deep_copy(source: &Value) -> CopyResult<Value> {
    Copier::default().deep_copy(source)
}

/// [`Copier::move_out`] with the default configuration. Empties `source`.
///
/// # Errors
///
/// See [`Copier::move_out`].
pub fn move_out(source: &Value) -> CopyResult<Value> {
    Copier::default().move_out(source)
}

/// [`Copier::assign`] with the default configuration.
///
/// # Errors
///
/// See [`Copier::assign`].
pub fn assign(target: &Value, sources: &[Value]) -> CopyResult<()> {
    Copier::default().assign(target, sources)
}
