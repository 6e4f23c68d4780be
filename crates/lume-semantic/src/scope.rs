//! # Local Name Resolution
//!
//! Lexical resolution of a bare name to an enclosing local binding. The
//! indexer uses this to separate genuine globals from assignments to locals:
//! only names that do *not* resolve here are indexed as members of the
//! global pseudo-class.

use lume_syntax::{NodeId, NodeKind, SourceFile};

/// Resolve `name_expr` against the enclosing local scopes.
///
/// Returns the binding `NameDef` (or the `local function` definition) when
/// the name is a local, `None` when it falls through to the global
/// environment. Bindings are only visible after their declaration completes,
/// except a `local function` name, which is visible inside its own body.
pub fn resolve_local(file: &SourceFile, name_expr: NodeId) -> Option<NodeId> {
    let tree = file.tree();
    let name = file.text(name_expr);
    if name.is_empty() {
        return None;
    }
    let use_start = tree.span(name_expr).start;

    for scope in tree.ancestors(name_expr) {
        match tree.kind(scope) {
            NodeKind::Block | NodeKind::File => {
                let mut binding = None;
                for &stmt in tree.children(scope) {
                    match tree.kind(stmt) {
                        NodeKind::LocalDef if tree.span(stmt).end <= use_start => {
                            for def in tree.children_of_kind(stmt, NodeKind::NameDef) {
                                if file.text(def) == name {
                                    binding = Some(def);
                                }
                            }
                        }
                        NodeKind::LocalFuncDef if tree.span(stmt).start < use_start => {
                            if let Some(id) = tree.child_of_kind(stmt, NodeKind::Ident) {
                                if file.text(id) == name {
                                    binding = Some(stmt);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                if binding.is_some() {
                    return binding;
                }
            }
            NodeKind::FuncDef
            | NodeKind::LocalFuncDef
            | NodeKind::ClassMethodDef
            | NodeKind::ClosureExpr => {
                if let Some(params) = tree.child_of_kind(scope, NodeKind::ParamList) {
                    for def in tree.children_of_kind(params, NodeKind::NameDef) {
                        if file.text(def) == name {
                            return Some(def);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    None
}
