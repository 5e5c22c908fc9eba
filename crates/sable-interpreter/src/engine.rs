//! Engine state: the environment arena, the global binding object, the
//! execution context and the resolution cache, plus the declaration entry
//! points the statement evaluator drives.
//!
//! One `Engine` is one engine instance. Instances never share environments,
//! caches or the global object; evaluation within an instance is strictly
//! single-threaded.

use sable_common::{Key, Span};
use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::cache::ResolutionCache;
use crate::environment::{EnvironmentArena, EnvironmentId, EnvironmentKind, binding_flags};
use crate::object::JsObject;
use crate::value::JsValue;

/// Per-instance evaluation state threaded through every resolution call.
///
/// The strict-mode flag is a push/pop stack rather than ambient global
/// state: each lexically strict (or sloppy) region pushes on entry and pops
/// on exit, and the engine seeds one sloppy frame at construction so the
/// stack is never read empty.
#[derive(Debug)]
pub(crate) struct ExecutionContext {
    pub(crate) lexical_env: EnvironmentId,
    pub(crate) strict_stack: SmallVec<[bool; 8]>,
    /// Diagnostic slot: the span of the node currently being evaluated,
    /// recorded so errors raised on a fast path still point at the right
    /// source position.
    pub(crate) last_node: Option<Span>,
}

#[derive(Debug)]
pub struct Engine {
    pub(crate) envs: EnvironmentArena,
    pub(crate) cache: ResolutionCache,
    pub(crate) context: ExecutionContext,
    global_object: JsObject,
    global_env: EnvironmentId,
}

impl Engine {
    pub fn new() -> Self {
        let mut envs = EnvironmentArena::new();
        let global_env = envs.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
        Self {
            envs,
            cache: ResolutionCache::new(),
            context: ExecutionContext {
                lexical_env: global_env,
                strict_stack: smallvec![false],
                last_node: None,
            },
            global_object: JsObject::new(),
            global_env,
        }
    }

    pub fn current_environment(&self) -> EnvironmentId {
        self.context.lexical_env
    }

    pub fn global_environment(&self) -> EnvironmentId {
        self.global_env
    }

    pub fn global_object(&self) -> &JsObject {
        &self.global_object
    }

    pub fn environments(&self) -> &EnvironmentArena {
        &self.envs
    }

    pub fn environments_mut(&mut self) -> &mut EnvironmentArena {
        &mut self.envs
    }

    pub fn resolution_cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn last_evaluated_node(&self) -> Option<Span> {
        self.context.last_node
    }

    // Scope management

    /// Enters a new innermost scope and returns its id.
    pub fn push_environment(&mut self, kind: EnvironmentKind) -> EnvironmentId {
        let env = self.envs.alloc(self.context.lexical_env, kind);
        self.context.lexical_env = env;
        env
    }

    /// Leaves the current innermost scope, discarding it and every cache
    /// entry recorded under it.
    pub fn pop_environment(&mut self) {
        let current = self.context.lexical_env;
        debug_assert_ne!(current, self.global_env, "cannot pop the global environment");
        if current == self.global_env {
            return;
        }
        let parent = self.envs.parent(current);
        self.envs.discard(current);
        self.cache.invalidate_environment(current);
        self.context.lexical_env = parent;
        debug!("popped environment {} back to {:?}", current.0, parent);
    }

    // Strict mode

    pub fn push_strict(&mut self, strict: bool) {
        self.context.strict_stack.push(strict);
    }

    pub fn pop_strict(&mut self) {
        debug_assert!(
            self.context.strict_stack.len() > 1,
            "strict-mode stack underflow"
        );
        if self.context.strict_stack.len() > 1 {
            self.context.strict_stack.pop();
        }
    }

    pub fn is_strict(&self) -> bool {
        *self
            .context
            .strict_stack
            .last()
            .expect("strict-mode stack is seeded at construction")
    }

    // Declarations, driven by the statement evaluator (and tests)

    /// `let`-style declaration in the current scope: mutable, born in its
    /// temporal dead zone.
    pub fn declare_lexical(&mut self, name: &str) -> Key {
        let key = Key::new(name);
        self.cache.invalidate_key(&key);
        self.envs
            .declare(self.context.lexical_env, key.clone(), binding_flags::MUTABLE);
        key
    }

    /// `const`-style declaration in the current scope: immutable, born in
    /// its temporal dead zone.
    pub fn declare_lexical_immutable(&mut self, name: &str) -> Key {
        let key = Key::new(name);
        self.cache.invalidate_key(&key);
        self.envs.declare(self.context.lexical_env, key.clone(), 0);
        key
    }

    /// `var`-style declaration: hoisted to the nearest function or global
    /// scope and readable as `undefined` before its statement executes.
    pub fn declare_var(&mut self, name: &str) -> Key {
        let key = Key::new(name);
        self.cache.invalidate_key(&key);
        let target = self.envs.nearest_var_scope(self.context.lexical_env);
        self.envs.declare_initialized(
            target,
            key.clone(),
            binding_flags::MUTABLE,
            JsValue::Undefined,
        );
        key
    }

    /// Runs the declaring construct's first assignment, ending the temporal
    /// dead zone. Resolves the declaring scope through the chain so a `var`
    /// hoisted out of a block still initializes its real slot.
    pub fn initialize_binding(&mut self, key: &Key, value: JsValue) -> bool {
        self.cache.invalidate_key(key);
        match self.envs.find_binding(self.context.lexical_env, key) {
            Some(env) => self.envs.initialize_binding(env, key, value),
            None => false,
        }
    }

    /// Defines a property on the global binding object (built-in globals,
    /// host objects).
    pub fn define_global(&mut self, name: &str, value: JsValue) {
        self.global_object.set(Key::new(name), value);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
