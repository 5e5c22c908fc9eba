//! Identifier occurrences and the resolution algorithm.
//!
//! This is the hottest path in the engine: every variable access in every
//! evaluated program routes through `evaluate_as_value` or
//! `evaluate_as_reference`. The per-occurrence key is computed once and
//! memoized on the node; resolved values are memoized in the engine-owned
//! [`ResolutionCache`](crate::cache::ResolutionCache), never on the shared
//! syntax node itself.

use std::cell::OnceCell;

use sable_common::{Key, Span};
use tracing::trace;

use crate::engine::Engine;
use crate::environment::BindingValue;
use crate::error::JsError;
use crate::reference::{Reference, ReferenceBase};
use crate::value::JsValue;

/// One syntactic occurrence of a bare identifier.
#[derive(Debug)]
pub struct IdentifierExpression {
    name: String,
    span: Span,
    /// Lazily interned key; keyed by node identity, computed at most once
    /// across all evaluations of this occurrence.
    key: OnceCell<Key>,
}

impl IdentifierExpression {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            key: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The occurrence's interned key, computed on first resolution. Stable
    /// for the node's lifetime, so callers may use it for identity-stable
    /// comparison (e.g. detecting self-reference in an initializer).
    pub fn key(&self) -> &Key {
        self.key.get_or_init(|| Key::new(&self.name))
    }

    /// True for the reserved names that force stricter declaration and
    /// assignment handling: the implicit arguments object and the dynamic
    /// evaluation entry point. Resolution itself treats them like any other
    /// name.
    pub fn is_reserved_binding_name(&self) -> bool {
        matches!(self.name.as_str(), "eval" | "arguments")
    }
}

impl Engine {
    /// Evaluates an identifier occurrence as a reference: the assignment
    /// target / `typeof` operand form.
    ///
    /// Walks the chain innermost to outermost asking each scope whether it
    /// declares the key. Exhausting the chain is not an error here: the
    /// reference comes back with an unresolved base, and only demanding its
    /// value can fail. `typeof x` with `x` undeclared must not throw.
    pub fn evaluate_as_reference(&mut self, occurrence: &IdentifierExpression) -> Reference {
        let key = occurrence.key();
        let base = match self.envs.find_binding(self.context.lexical_env, key) {
            Some(env) => ReferenceBase::Environment(env),
            None => ReferenceBase::Unresolved,
        };
        trace!("resolved reference '{key}' to {base:?}");
        Reference::new(base, key.clone(), self.is_strict())
    }

    /// Evaluates an identifier occurrence as a value: the read form.
    ///
    /// Fast path first: a cache hit for (current scope, key) skips the
    /// chain walk entirely. Otherwise one combined existence-and-value
    /// traversal decides between the three outcomes: a value, the
    /// not-initialized error (binding found inside its temporal dead zone),
    /// or the global fallback ending in the not-defined error.
    pub fn evaluate_as_value(
        &mut self,
        occurrence: &IdentifierExpression,
    ) -> Result<JsValue, JsError> {
        // Errors raised below (and cache-hit shortcuts taken by callers)
        // must point at this occurrence.
        self.context.last_node = Some(occurrence.span());

        let key = occurrence.key();
        let current = self.context.lexical_env;

        if let Some(value) = self.cache.get(current, key) {
            trace!("cache hit for '{key}'");
            return Ok(value.clone());
        }

        let value = match self.envs.find_binding_value(current, key) {
            Some((_, BindingValue::Uninitialized)) => {
                return Err(JsError::not_initialized(key, Some(occurrence.span())));
            }
            Some((env, BindingValue::Value(value))) => {
                // Initialized immutable bindings cannot resolve differently
                // for this scope again; memoize them. Arguments objects are
                // excluded because reading one is a materializing side
                // effect.
                if !matches!(value, JsValue::Arguments(_))
                    && self.envs.is_immutable_initialized(env, key)
                {
                    self.cache.insert(current, key.clone(), value.clone());
                }
                value
            }
            None => {
                let reference =
                    Reference::new(ReferenceBase::Unresolved, key.clone(), self.is_strict());
                self.get_reference_value(&reference)?
            }
        };

        // Reading the bare identifier freezes the arguments object's state.
        if let JsValue::Arguments(arguments) = &value {
            arguments.materialize(&self.envs);
        }

        Ok(value)
    }
}
