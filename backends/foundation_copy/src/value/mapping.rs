use std::cell::{Ref, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;

use super::Value;

pub type Entries = IndexMap<String, Value>;

/// Mapping is a handle to a string-keyed record that keeps its keys in
/// insertion order.
///
/// Cloning a `Mapping` does not duplicate the record: both handles point at
/// the same instance and a mutation through one is visible through the
/// other. Use [`crate::shallow_copy`] or [`crate::deep_copy`] to get a new
/// instance.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<Entries>>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry under `key`. Container entries come back as
    /// aliases of the stored instance.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Binds `key` to `value`, returning the previous binding. A key that
    /// already exists keeps its position.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Removes `key` while keeping the order of the remaining keys.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Runs `f` against the borrowed entries.
    ///
    /// # Panics
    ///
    /// Panics if `f` mutates this same mapping.
    pub fn with<R>(&self, f: impl FnOnce(&Entries) -> R) -> R {
        f(&self.0.borrow())
    }

    /// Returns true when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Entries> {
        self.0.borrow()
    }
}

impl From<Entries> for Mapping {
    fn from(entries: Entries) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<Entries>()
            .into()
    }
}
