//! Identifier resolution core for the sable JavaScript engine.
//!
//! Every variable access in an evaluated program routes through this crate:
//! given an identifier occurrence, it walks the chain of nested lexical
//! environments and produces either a [`Reference`] (for assignment targets
//! and `typeof`-style probes) or a materialized [`JsValue`] (for reads),
//! enforcing hoisting, temporal-dead-zone gating and strict-mode rules
//! along the way.
//!
//! The crate also carries the narrow runtime surface the resolver needs to
//! be exercised: environment storage, a minimal value model, the arguments
//! object, and the runtime reference-error model. Expression evaluation,
//! function invocation and the full property model live elsewhere in the
//! engine.

// Environment records and the scope-chain arena
pub mod environment;
pub use environment::{
    BindingValue, EnvironmentArena, EnvironmentId, EnvironmentKind, WriteOutcome, binding_flags,
};

// Engine state: execution context, scope management, declarations
pub mod engine;
pub use engine::Engine;

// Identifier occurrences and the resolution algorithm
pub mod identifier;
pub use identifier::IdentifierExpression;

// References produced for assignment targets and unresolved lookups
pub mod reference;
pub use reference::{Reference, ReferenceBase};

// Resolution memoization keyed by (environment, name)
pub mod cache;
pub use cache::ResolutionCache;

// Runtime reference errors
pub mod error;
pub use error::{JsError, JsErrorKind};

// Minimal value model
pub mod value;
pub use value::JsValue;

pub mod object;
pub use object::JsObject;

pub mod arguments;
pub use arguments::JsArguments;
