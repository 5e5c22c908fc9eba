//! The arguments object: a live, index-addressable view of a function's
//! actual parameters.
//!
//! While the mapping is live, indexed reads and writes go through the
//! parameter bindings of the declaring environment. Reading the bare
//! `arguments` identifier materializes the object first: the current
//! parameter values are snapshotted into stable per-element storage and the
//! mapping is severed, so the identifier's value and later indexed reads
//! observe one consistent state.

use std::cell::RefCell;
use std::rc::Rc;

use sable_common::Key;
use tracing::trace;

use crate::environment::{BindingValue, EnvironmentArena, EnvironmentId, WriteOutcome};
use crate::value::JsValue;

#[derive(Clone, Debug)]
pub struct JsArguments {
    inner: Rc<RefCell<ArgumentsData>>,
}

#[derive(Debug)]
struct ArgumentsData {
    /// Snapshot storage; authoritative once the mapping is gone.
    elements: Vec<JsValue>,
    mapping: Option<ArgumentsMapping>,
}

#[derive(Debug)]
struct ArgumentsMapping {
    env: EnvironmentId,
    parameters: Vec<Key>,
}

impl JsArguments {
    /// Sloppy-mode form: indices alias the parameter bindings in `env`
    /// until materialization.
    pub fn new_mapped(env: EnvironmentId, parameters: Vec<Key>, initial: Vec<JsValue>) -> Self {
        debug_assert_eq!(parameters.len(), initial.len());
        Self {
            inner: Rc::new(RefCell::new(ArgumentsData {
                elements: initial,
                mapping: Some(ArgumentsMapping { env, parameters }),
            })),
        }
    }

    /// Strict-mode form: a plain snapshot with no live mapping.
    pub fn new_unmapped(elements: Vec<JsValue>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ArgumentsData {
                elements,
                mapping: None,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().elements.is_empty()
    }

    pub fn is_materialized(&self) -> bool {
        self.inner.borrow().mapping.is_none()
    }

    pub fn get_index(&self, arena: &EnvironmentArena, index: usize) -> Option<JsValue> {
        let data = self.inner.borrow();
        if let Some(mapping) = &data.mapping
            && let Some(key) = mapping.parameters.get(index)
            && let Some(BindingValue::Value(value)) = arena.binding_value(mapping.env, key)
        {
            return Some(value);
        }
        data.elements.get(index).cloned()
    }

    pub fn set_index(&self, arena: &mut EnvironmentArena, index: usize, value: JsValue) {
        let mut data = self.inner.borrow_mut();
        if let Some(mapping) = &data.mapping
            && let Some(key) = mapping.parameters.get(index)
        {
            let outcome = arena.set_binding_value(mapping.env, key, value);
            debug_assert_eq!(outcome, WriteOutcome::Written);
            return;
        }
        if let Some(slot) = data.elements.get_mut(index) {
            *slot = value;
        }
    }

    /// Snapshots the mapped parameter values into the element storage and
    /// severs the mapping. Idempotent.
    pub fn materialize(&self, arena: &EnvironmentArena) {
        let mut data = self.inner.borrow_mut();
        let Some(mapping) = data.mapping.take() else {
            return;
        };
        trace!("materializing arguments object ({} elements)", mapping.parameters.len());
        for (index, key) in mapping.parameters.iter().enumerate() {
            if let Some(BindingValue::Value(value)) = arena.binding_value(mapping.env, key) {
                data.elements[index] = value;
            }
        }
    }

    /// Identity comparison; two handles are equal iff they share storage.
    pub fn ptr_eq(&self, other: &JsArguments) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
