//! Property-bag objects.
//!
//! Just enough of an object to back the global binding object in the
//! unresolved-reference fallback path.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use sable_common::Key;

use crate::value::JsValue;

#[derive(Clone, Debug, Default)]
pub struct JsObject {
    properties: Rc<RefCell<FxHashMap<Key, JsValue>>>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &Key) -> Option<JsValue> {
        self.properties.borrow().get(name).cloned()
    }

    pub fn set(&self, name: Key, value: JsValue) {
        self.properties.borrow_mut().insert(name, value);
    }

    pub fn has(&self, name: &Key) -> bool {
        self.properties.borrow().contains_key(name)
    }

    pub fn delete(&self, name: &Key) -> bool {
        self.properties.borrow_mut().remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.properties.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.borrow().is_empty()
    }

    /// Identity comparison; two handles are equal iff they share storage.
    pub fn ptr_eq(&self, other: &JsObject) -> bool {
        Rc::ptr_eq(&self.properties, &other.properties)
    }
}
