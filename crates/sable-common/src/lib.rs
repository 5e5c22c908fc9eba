//! Common types for the sable JavaScript engine.
//!
//! This crate provides foundational types used across all sable crates:
//! - Interned binding keys with precomputed hashes (`Key`)
//! - Source spans (`Span`)

// Interned binding names with precomputed ordinal hashes
pub mod key;
pub use key::Key;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;
