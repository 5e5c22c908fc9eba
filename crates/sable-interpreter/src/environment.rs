//! Lexical environment records and the arena that owns them.
//!
//! Environments form a singly-linked chain from innermost to outermost
//! through parent ids. The arena is monotonic: ids are never reused, so a
//! discarded environment can never alias a live one and stale ids held by
//! caches simply miss.

use rustc_hash::FxHashMap;
use sable_common::Key;
use tracing::debug;

use crate::value::JsValue;

/// Flag word for a single binding.
pub mod binding_flags {
    /// The binding may be reassigned after initialization (`let`, `var`,
    /// function parameters). Absent for `const`.
    pub const MUTABLE: u32 = 1 << 0;
}

/// Index of an environment in its [`EnvironmentArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnvironmentId(pub u32);

impl EnvironmentId {
    pub const NONE: EnvironmentId = EnvironmentId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnvironmentKind {
    Global,
    Function,
    Block,
}

/// A declared name and its storage slot. `value == None` means the binding
/// exists but its declaring statement has not executed yet (temporal dead
/// zone).
#[derive(Clone, Debug)]
struct Binding {
    value: Option<JsValue>,
    flags: u32,
}

impl Binding {
    fn is_mutable(&self) -> bool {
        self.flags & binding_flags::MUTABLE != 0
    }
}

/// Result of the combined existence-and-value fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingValue {
    Uninitialized,
    Value(JsValue),
}

/// Outcome of an assignment through [`EnvironmentArena::set_binding_value`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The binding exists but is still in its temporal dead zone.
    Uninitialized,
    /// The binding is immutable; the value was not stored. Surfacing this
    /// as a host `TypeError` is the assignment evaluator's job.
    Immutable,
    /// No such binding in the addressed environment.
    Missing,
}

#[derive(Debug)]
struct Environment {
    parent: EnvironmentId,
    kind: EnvironmentKind,
    bindings: FxHashMap<Key, Binding>,
    discarded: bool,
}

/// Owns every environment created by one engine instance.
#[derive(Debug, Default)]
pub struct EnvironmentArena {
    environments: Vec<Environment>,
}

impl EnvironmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, parent: EnvironmentId, kind: EnvironmentKind) -> EnvironmentId {
        let id = EnvironmentId(self.environments.len() as u32);
        self.environments.push(Environment {
            parent,
            kind,
            bindings: FxHashMap::default(),
            discarded: false,
        });
        debug!("allocated {kind:?} environment {} (parent {:?})", id.0, parent);
        id
    }

    pub fn parent(&self, env: EnvironmentId) -> EnvironmentId {
        self.get(env).map_or(EnvironmentId::NONE, |e| e.parent)
    }

    pub fn kind(&self, env: EnvironmentId) -> Option<EnvironmentKind> {
        self.get(env).map(|e| e.kind)
    }

    /// Drops the environment's bindings and takes it out of every lookup.
    /// The id stays allocated so later allocations can never be confused
    /// with it.
    pub fn discard(&mut self, env: EnvironmentId) {
        if let Some(record) = self.get_mut(env) {
            record.discarded = true;
            record.bindings.clear();
            debug!("discarded environment {}", env.0);
        }
    }

    pub fn is_discarded(&self, env: EnvironmentId) -> bool {
        self.get(env).is_none_or(|e| e.discarded)
    }

    /// Declares `key` without initializing it: the binding is born in its
    /// temporal dead zone. Re-declaration overwrites; language-level
    /// legality is the static-semantics pass's concern.
    pub fn declare(&mut self, env: EnvironmentId, key: Key, flags: u32) {
        if let Some(record) = self.get_mut(env) {
            record.bindings.insert(key, Binding { value: None, flags });
        }
    }

    /// Declares `key` already initialized to `value`. Hoisted `var` and
    /// function declarations use this: they are visible and readable
    /// (as `undefined`) before their statement executes.
    pub fn declare_initialized(&mut self, env: EnvironmentId, key: Key, flags: u32, value: JsValue) {
        if let Some(record) = self.get_mut(env) {
            record.bindings.insert(
                key,
                Binding {
                    value: Some(value),
                    flags,
                },
            );
        }
    }

    /// First assignment by the declaring construct; ends the temporal dead
    /// zone. Returns false when no such binding exists.
    pub fn initialize_binding(&mut self, env: EnvironmentId, key: &Key, value: JsValue) -> bool {
        if let Some(record) = self.get_mut(env)
            && let Some(binding) = record.bindings.get_mut(key)
        {
            binding.value = Some(value);
            true
        } else {
            false
        }
    }

    pub fn set_binding_value(
        &mut self,
        env: EnvironmentId,
        key: &Key,
        value: JsValue,
    ) -> WriteOutcome {
        let Some(record) = self.get_mut(env) else {
            return WriteOutcome::Missing;
        };
        let Some(binding) = record.bindings.get_mut(key) else {
            return WriteOutcome::Missing;
        };
        if binding.value.is_none() {
            return WriteOutcome::Uninitialized;
        }
        if !binding.is_mutable() {
            return WriteOutcome::Immutable;
        }
        binding.value = Some(value);
        WriteOutcome::Written
    }

    /// Per-scope existence predicate; does not walk the chain.
    pub fn has_binding(&self, env: EnvironmentId, key: &Key) -> bool {
        self.get(env)
            .is_some_and(|record| !record.discarded && record.bindings.contains_key(key))
    }

    /// Combined existence-and-value fetch for one environment.
    pub fn binding_value(&self, env: EnvironmentId, key: &Key) -> Option<BindingValue> {
        let record = self.get(env)?;
        if record.discarded {
            return None;
        }
        record.bindings.get(key).map(|binding| match &binding.value {
            Some(value) => BindingValue::Value(value.clone()),
            None => BindingValue::Uninitialized,
        })
    }

    /// Walks the chain from `start` outwards and returns the first
    /// environment that declares `key`.
    pub fn find_binding(&self, start: EnvironmentId, key: &Key) -> Option<EnvironmentId> {
        let mut current = start;
        while let Some(record) = self.get(current) {
            if !record.discarded && record.bindings.contains_key(key) {
                return Some(current);
            }
            current = record.parent;
        }
        None
    }

    /// Walks the chain once, fetching existence and value together so a hit
    /// never costs a second traversal.
    pub fn find_binding_value(
        &self,
        start: EnvironmentId,
        key: &Key,
    ) -> Option<(EnvironmentId, BindingValue)> {
        let mut current = start;
        while let Some(record) = self.get(current) {
            if !record.discarded
                && let Some(binding) = record.bindings.get(key)
            {
                let value = match &binding.value {
                    Some(value) => BindingValue::Value(value.clone()),
                    None => BindingValue::Uninitialized,
                };
                return Some((current, value));
            }
            current = record.parent;
        }
        None
    }

    /// Nearest enclosing environment `var` declarations hoist into: the
    /// innermost Function or Global environment at or above `start`.
    pub fn nearest_var_scope(&self, start: EnvironmentId) -> EnvironmentId {
        let mut current = start;
        while let Some(record) = self.get(current) {
            if record.kind != EnvironmentKind::Block {
                return current;
            }
            current = record.parent;
        }
        start
    }

    /// True when `key` is bound in `env` as an initialized immutable
    /// binding — the only shape the resolution cache may memoize.
    pub fn is_immutable_initialized(&self, env: EnvironmentId, key: &Key) -> bool {
        self.get(env).is_some_and(|record| {
            !record.discarded
                && record
                    .bindings
                    .get(key)
                    .is_some_and(|b| b.value.is_some() && !b.is_mutable())
        })
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    fn get(&self, env: EnvironmentId) -> Option<&Environment> {
        if env.is_none() {
            return None;
        }
        self.environments.get(env.0 as usize)
    }

    fn get_mut(&mut self, env: EnvironmentId) -> Option<&mut Environment> {
        if env.is_none() {
            return None;
        }
        self.environments.get_mut(env.0 as usize)
    }
}
