//! References: the intermediate, not-yet-dereferenced handle identifying
//! "this name, in this scope".
//!
//! A reference is a plain stack value returned by move. It is small enough
//! (base id, shared key, flag) that pooling would buy nothing, and move
//! semantics rule out cross-call retention or partially-stale reuse.

use sable_common::Key;
use tracing::{debug, warn};

use crate::engine::Engine;
use crate::environment::{BindingValue, EnvironmentId, WriteOutcome};
use crate::error::JsError;
use crate::value::JsValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReferenceBase {
    /// The environment whose record declares the name.
    Environment(EnvironmentId),
    /// No scope in the chain binds the name; final resolution goes through
    /// the global binding object when (and only when) a value is demanded.
    Unresolved,
}

#[derive(Clone, Debug)]
pub struct Reference {
    base: ReferenceBase,
    name: Key,
    strict: bool,
    /// Always `None` for simple identifier references; reserved for member
    /// access, which is produced elsewhere.
    this_value: Option<JsValue>,
}

impl Reference {
    pub fn new(base: ReferenceBase, name: Key, strict: bool) -> Self {
        Self {
            base,
            name,
            strict,
            this_value: None,
        }
    }

    pub fn base(&self) -> ReferenceBase {
        self.base
    }

    pub fn name(&self) -> &Key {
        &self.name
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn this_value(&self) -> Option<&JsValue> {
        self.this_value.as_ref()
    }

    pub fn is_unresolvable(&self) -> bool {
        self.base == ReferenceBase::Unresolved
    }
}

impl Engine {
    /// Dereferences `reference` into a value.
    ///
    /// An environment base reads the binding directly; an unresolved base
    /// falls back to the global binding object. Taking the reference never
    /// errors, but demanding its value does when the binding is still in
    /// its dead zone or nothing provides the name at all.
    pub fn get_reference_value(&self, reference: &Reference) -> Result<JsValue, JsError> {
        match reference.base() {
            ReferenceBase::Environment(env) => {
                match self.envs.binding_value(env, reference.name()) {
                    Some(BindingValue::Value(value)) => Ok(value),
                    Some(BindingValue::Uninitialized) => Err(JsError::not_initialized(
                        reference.name(),
                        self.last_evaluated_node(),
                    )),
                    // The environment was discarded between evaluation and
                    // dereference; treat like an unresolvable name.
                    None => Err(JsError::not_defined(
                        reference.name(),
                        self.last_evaluated_node(),
                    )),
                }
            }
            ReferenceBase::Unresolved => {
                self.global_object().get(reference.name()).ok_or_else(|| {
                    JsError::not_defined(reference.name(), self.last_evaluated_node())
                })
            }
        }
    }

    /// Stores `value` through `reference`.
    ///
    /// Unresolved bases follow the host language: strict mode refuses to
    /// invent a global, sloppy mode creates a property on the global
    /// binding object.
    pub fn put_reference_value(
        &mut self,
        reference: &Reference,
        value: JsValue,
    ) -> Result<(), JsError> {
        match reference.base() {
            ReferenceBase::Environment(env) => {
                match self.envs.set_binding_value(env, reference.name(), value) {
                    WriteOutcome::Written => Ok(()),
                    WriteOutcome::Uninitialized => Err(JsError::not_initialized(
                        reference.name(),
                        self.last_evaluated_node(),
                    )),
                    WriteOutcome::Immutable => {
                        if reference.is_strict() {
                            return Err(JsError::assignment_to_constant(
                                reference.name(),
                                self.last_evaluated_node(),
                            ));
                        }
                        // Sloppy mode drops the write on the floor.
                        warn!("rejected write to immutable binding '{}'", reference.name());
                        Ok(())
                    }
                    WriteOutcome::Missing => Err(JsError::not_defined(
                        reference.name(),
                        self.last_evaluated_node(),
                    )),
                }
            }
            ReferenceBase::Unresolved => {
                if reference.is_strict() {
                    return Err(JsError::not_defined(
                        reference.name(),
                        self.last_evaluated_node(),
                    ));
                }
                debug!("creating global '{}' from sloppy-mode assignment", reference.name());
                self.global_object().set(reference.name().clone(), value);
                Ok(())
            }
        }
    }
}
