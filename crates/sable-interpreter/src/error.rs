//! Runtime errors raised by identifier resolution and reference writes.
//!
//! Resolution itself raises exactly two kinds, both reference errors; the
//! reference write path adds the strict-mode constant-write error. All
//! carry the offending name and surface synchronously at the point of
//! access. Property-access errors and everything else belong to other
//! parts of the engine.

use std::fmt;

use sable_common::{Key, Span};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum JsErrorKind {
    /// No scope in the chain binds the name and the global fallback failed.
    ReferenceNotDefined,
    /// The binding exists but its declaring statement has not executed yet.
    ReferenceNotInitialized,
    /// Strict-mode write to an immutable binding.
    AssignmentToConstant,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JsError {
    pub kind: JsErrorKind,
    pub name: Key,
    pub message: String,
    pub span: Option<Span>,
}

impl JsError {
    pub fn not_defined(name: &Key, span: Option<Span>) -> Self {
        Self {
            kind: JsErrorKind::ReferenceNotDefined,
            message: format!("{name} is not defined"),
            name: name.clone(),
            span,
        }
    }

    pub fn not_initialized(name: &Key, span: Option<Span>) -> Self {
        Self {
            kind: JsErrorKind::ReferenceNotInitialized,
            message: format!("{name} has not been initialized"),
            name: name.clone(),
            span,
        }
    }

    pub fn assignment_to_constant(name: &Key, span: Option<Span>) -> Self {
        Self {
            kind: JsErrorKind::AssignmentToConstant,
            message: format!("Assignment to constant variable '{name}'"),
            name: name.clone(),
            span,
        }
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host_kind = match self.kind {
            JsErrorKind::ReferenceNotDefined | JsErrorKind::ReferenceNotInitialized => {
                "ReferenceError"
            }
            JsErrorKind::AssignmentToConstant => "TypeError",
        };
        write!(f, "{host_kind}: {}", self.message)
    }
}

impl std::error::Error for JsError {}
