use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::Value;

/// Sequence is a handle to an ordered, growable list of values.
///
/// Like [`super::Mapping`], cloning the handle aliases the list.
#[derive(Clone, Default)]
pub struct Sequence(Rc<RefCell<Vec<Value>>>);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replaces the element at `index` and returns the old one. Writing past
    /// the end grows the list, filling the gap with `Null`.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let mut items = self.0.borrow_mut();
        if index < items.len() {
            return Some(std::mem::replace(&mut items[index], value.into()));
        }
        items.resize(index, Value::Null);
        items.push(value.into());
        None
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Truncates the list to length zero.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Snapshot of the elements. Container elements are aliased.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Runs `f` against the borrowed elements.
    ///
    /// # Panics
    ///
    /// Panics if `f` mutates this same sequence.
    pub fn with<R>(&self, f: impl FnOnce(&[Value]) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        iter.into_iter().map(Into::into).collect::<Vec<_>>().into()
    }
}
