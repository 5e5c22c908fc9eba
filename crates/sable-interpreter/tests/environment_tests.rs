//! Environment arena semantics: declaration, initialization, assignment,
//! and the single-traversal chain walks.

use sable_common::Key;
use sable_interpreter::{
    BindingValue, EnvironmentArena, EnvironmentId, EnvironmentKind, JsValue, WriteOutcome,
    binding_flags,
};

#[test]
fn alloc_links_parents() {
    let mut arena = EnvironmentArena::new();
    let global = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let function = arena.alloc(global, EnvironmentKind::Function);
    let block = arena.alloc(function, EnvironmentKind::Block);

    assert_eq!(arena.parent(block), function);
    assert_eq!(arena.parent(function), global);
    assert_eq!(arena.parent(global), EnvironmentId::NONE);
    assert_eq!(arena.kind(block), Some(EnvironmentKind::Block));
}

#[test]
fn declared_binding_starts_uninitialized() {
    let mut arena = EnvironmentArena::new();
    let env = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let key = Key::new("x");
    arena.declare(env, key.clone(), binding_flags::MUTABLE);

    assert!(arena.has_binding(env, &key));
    assert_eq!(arena.binding_value(env, &key), Some(BindingValue::Uninitialized));

    assert!(arena.initialize_binding(env, &key, JsValue::Number(1.0)));
    assert_eq!(
        arena.binding_value(env, &key),
        Some(BindingValue::Value(JsValue::Number(1.0)))
    );
}

#[test]
fn declare_initialized_skips_the_dead_zone() {
    let mut arena = EnvironmentArena::new();
    let env = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let key = Key::new("v");
    arena.declare_initialized(env, key.clone(), binding_flags::MUTABLE, JsValue::Undefined);

    assert_eq!(
        arena.binding_value(env, &key),
        Some(BindingValue::Value(JsValue::Undefined))
    );
}

#[test]
fn assignment_outcomes() {
    let mut arena = EnvironmentArena::new();
    let env = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);

    let dead = Key::new("dead");
    arena.declare(env, dead.clone(), binding_flags::MUTABLE);
    assert_eq!(
        arena.set_binding_value(env, &dead, JsValue::Number(1.0)),
        WriteOutcome::Uninitialized
    );

    let constant = Key::new("constant");
    arena.declare(env, constant.clone(), 0);
    arena.initialize_binding(env, &constant, JsValue::Number(1.0));
    assert_eq!(
        arena.set_binding_value(env, &constant, JsValue::Number(2.0)),
        WriteOutcome::Immutable
    );
    // Rejected write leaves the value untouched.
    assert_eq!(
        arena.binding_value(env, &constant),
        Some(BindingValue::Value(JsValue::Number(1.0)))
    );

    let mutable = Key::new("mutable");
    arena.declare(env, mutable.clone(), binding_flags::MUTABLE);
    arena.initialize_binding(env, &mutable, JsValue::Number(1.0));
    assert_eq!(
        arena.set_binding_value(env, &mutable, JsValue::Number(2.0)),
        WriteOutcome::Written
    );

    assert_eq!(
        arena.set_binding_value(env, &Key::new("absent"), JsValue::Null),
        WriteOutcome::Missing
    );
}

#[test]
fn chain_walk_finds_the_innermost_declaration() {
    let mut arena = EnvironmentArena::new();
    let global = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let outer = arena.alloc(global, EnvironmentKind::Block);
    let inner = arena.alloc(outer, EnvironmentKind::Block);

    let key = Key::new("x");
    arena.declare_initialized(global, key.clone(), binding_flags::MUTABLE, JsValue::Number(0.0));
    arena.declare_initialized(outer, key.clone(), binding_flags::MUTABLE, JsValue::Number(1.0));

    assert_eq!(arena.find_binding(inner, &key), Some(outer));
    assert_eq!(
        arena.find_binding_value(inner, &key),
        Some((outer, BindingValue::Value(JsValue::Number(1.0))))
    );
    assert_eq!(arena.find_binding(global, &key), Some(global));
    assert_eq!(arena.find_binding(inner, &Key::new("absent")), None);
}

#[test]
fn combined_walk_reports_dead_zone_bindings() {
    let mut arena = EnvironmentArena::new();
    let global = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let block = arena.alloc(global, EnvironmentKind::Block);

    let key = Key::new("a");
    arena.declare_initialized(global, key.clone(), binding_flags::MUTABLE, JsValue::Number(1.0));
    arena.declare(block, key.clone(), binding_flags::MUTABLE);

    // The inner uninitialized binding shadows the initialized outer one.
    assert_eq!(
        arena.find_binding_value(block, &key),
        Some((block, BindingValue::Uninitialized))
    );
}

#[test]
fn discarded_environments_drop_out_of_every_lookup() {
    let mut arena = EnvironmentArena::new();
    let global = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let block = arena.alloc(global, EnvironmentKind::Block);

    let key = Key::new("x");
    arena.declare_initialized(global, key.clone(), binding_flags::MUTABLE, JsValue::Number(1.0));
    arena.declare_initialized(block, key.clone(), binding_flags::MUTABLE, JsValue::Number(2.0));

    arena.discard(block);
    assert!(arena.is_discarded(block));
    assert!(!arena.has_binding(block, &key));
    assert_eq!(arena.binding_value(block, &key), None);
    // Walks started at the dead scope fall through to its parent.
    assert_eq!(arena.find_binding(block, &key), Some(global));
}

#[test]
fn ids_are_never_reused_after_discard() {
    let mut arena = EnvironmentArena::new();
    let global = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let first = arena.alloc(global, EnvironmentKind::Block);
    arena.discard(first);
    let second = arena.alloc(global, EnvironmentKind::Block);
    assert_ne!(first, second);
    assert!(arena.is_discarded(first));
    assert!(!arena.is_discarded(second));
}

#[test]
fn nearest_var_scope_skips_blocks() {
    let mut arena = EnvironmentArena::new();
    let global = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);
    let function = arena.alloc(global, EnvironmentKind::Function);
    let outer_block = arena.alloc(function, EnvironmentKind::Block);
    let inner_block = arena.alloc(outer_block, EnvironmentKind::Block);

    assert_eq!(arena.nearest_var_scope(inner_block), function);
    assert_eq!(arena.nearest_var_scope(function), function);
    assert_eq!(arena.nearest_var_scope(global), global);
}

#[test]
fn immutable_initialized_probe() {
    let mut arena = EnvironmentArena::new();
    let env = arena.alloc(EnvironmentId::NONE, EnvironmentKind::Global);

    let constant = Key::new("c");
    arena.declare(env, constant.clone(), 0);
    assert!(!arena.is_immutable_initialized(env, &constant));
    arena.initialize_binding(env, &constant, JsValue::Number(1.0));
    assert!(arena.is_immutable_initialized(env, &constant));

    let mutable = Key::new("m");
    arena.declare_initialized(env, mutable.clone(), binding_flags::MUTABLE, JsValue::Null);
    assert!(!arena.is_immutable_initialized(env, &mutable));
}
