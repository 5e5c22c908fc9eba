//! Resolution memoization.
//!
//! Lives on the engine, not on syntax nodes: entries are keyed by the
//! innermost environment active at evaluation time plus the identifier key,
//! and every entry for an environment dies with that environment. Two
//! activations of the same syntactic position run under distinct
//! environment ids, so they can never alias one entry. Declaring a name
//! through the engine drops every entry for that name, so a declaration
//! landing after a cached read cannot leave the shadowed value visible.
//!
//! Only initialized immutable bindings are eligible (see
//! [`crate::engine::Engine::evaluate_as_value`]): an environment's set of
//! declarations is fixed after instantiation, so such a binding cannot
//! resolve differently for the same innermost scope.

use rustc_hash::FxHashMap;
use sable_common::Key;

use crate::environment::EnvironmentId;
use crate::value::JsValue;

#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: FxHashMap<(EnvironmentId, Key), JsValue>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, env: EnvironmentId, key: &Key) -> Option<&JsValue> {
        self.entries.get(&(env, key.clone()))
    }

    pub fn insert(&mut self, env: EnvironmentId, key: Key, value: JsValue) {
        self.entries.insert((env, key), value);
    }

    /// Drops every entry recorded under `env`. Called whenever a scope is
    /// discarded.
    pub fn invalidate_environment(&mut self, env: EnvironmentId) {
        self.entries.retain(|(entry_env, _), _| *entry_env != env);
    }

    /// Drops every entry for `key`, regardless of environment. Called
    /// whenever a declaration (re)binds the name: a new binding may shadow
    /// whichever one a cached read resolved to.
    pub fn invalidate_key(&mut self, key: &Key) {
        self.entries.retain(|(_, entry_key), _| entry_key != key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
