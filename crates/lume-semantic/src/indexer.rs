//! # File Indexer
//!
//! One pre-order walk per file. Every node of a recognized kind is handed to
//! the matching occurrence emitter; everything else is skipped. A per-file
//! state machine guards against duplicate and re-entrant indexing, and the
//! guard releases the state on every exit path, so a walk that panics cannot
//! wedge the file out of re-indexing.
//!
//! Emission is append-only: nodes are never mutated, and a node lacking a
//! resolvable name or owner is skipped silently.

use std::sync::atomic::{AtomicU8, Ordering};

use smol_str::SmolStr;

use lume_syntax::{FileId, NodeId, NodeKind, SourceFile};

use crate::oracle::{InferContext, TypeOracle};
use crate::scope::resolve_local;
use crate::symbol_index::{member_key, member_key_of, IndexKey, SymbolIndex, GLOBAL_CLASS};

const NOT_INDEXED: u8 = 0;
const INDEXING: u8 = 1;
const INDEXED: u8 = 2;

/// Per-file indexing state: `NotIndexed -> Indexing -> Indexed`.
///
/// `Indexing` blocks re-entrant calls for the duration of the walk;
/// `Indexed` makes later calls no-ops until [`IndexState::reset`]. The
/// transitions are compare-and-swap based so racing workers cannot index the
/// same file twice.
#[derive(Debug, Default)]
pub struct IndexState {
    phase: AtomicU8,
}

impl IndexState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an indexing pass. Returns `None` when the file is already
    /// indexed or an indexing pass is in flight.
    pub fn try_begin(&self) -> Option<IndexingGuard<'_>> {
        self.phase
            .compare_exchange(NOT_INDEXED, INDEXING, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(IndexingGuard {
            state: self,
            completed: false,
        })
    }

    /// Un-index the file (after an edit, together with
    /// [`SymbolIndex::remove_stubs`]). Returns `false` while a pass is in
    /// flight or the file was never indexed.
    pub fn reset(&self) -> bool {
        self.phase
            .compare_exchange(INDEXED, NOT_INDEXED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_indexed(&self) -> bool {
        self.phase.load(Ordering::Acquire) == INDEXED
    }

    pub fn is_indexing(&self) -> bool {
        self.phase.load(Ordering::Acquire) == INDEXING
    }
}

/// Scoped hold on the `Indexing` phase.
///
/// Dropping without [`IndexingGuard::complete`] (an early return or a panic
/// during the walk) restores `NotIndexed`.
#[derive(Debug)]
pub struct IndexingGuard<'a> {
    state: &'a IndexState,
    completed: bool,
}

impl IndexingGuard<'_> {
    /// Mark the pass finished; the file becomes `Indexed`.
    pub fn complete(mut self) {
        self.completed = true;
    }
}

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        let phase = if self.completed { INDEXED } else { NOT_INDEXED };
        self.state.phase.store(phase, Ordering::Release);
    }
}

struct Sink<'a> {
    file: FileId,
    index: &'a SymbolIndex,
}

impl Sink<'_> {
    fn occurrence(&self, key: IndexKey, node: NodeId) {
        self.index.occurrence(self.file, key, node);
    }
}

/// Index one file into `index`.
///
/// No-op when `state` reports the file as already indexed or currently
/// indexing. Idempotent per session: indexing twice without an intervening
/// `remove_stubs` + `reset` produces no duplicate records.
pub fn index_file(
    file: &SourceFile,
    state: &IndexState,
    oracle: &dyn TypeOracle,
    index: &SymbolIndex,
) {
    let Some(guard) = state.try_begin() else {
        return;
    };
    let _span = tracing::trace_span!("index_file", file = %file.name()).entered();

    let sink = Sink {
        file: file.id(),
        index,
    };
    let tree = file.tree();
    for node in tree.preorder(tree.root()) {
        index_node(file, node, oracle, &sink);
    }

    guard.complete();
}

fn index_node(file: &SourceFile, node: NodeId, oracle: &dyn TypeOracle, sink: &Sink<'_>) {
    match file.tree().kind(node) {
        NodeKind::DocClassDef => index_doc_class(file, node, sink),
        NodeKind::DocFieldDef => index_doc_field(file, node, sink),
        NodeKind::ClassMethodDef => index_method(file, node, oracle, sink),
        NodeKind::IndexExpr => index_index_expr(file, node, oracle, sink),
        NodeKind::TableExpr => index_table_expr(file, node, sink),
        NodeKind::TableField => index_table_field(file, node, oracle, sink),
        NodeKind::NameExpr => index_name_expr(file, node, sink),
        NodeKind::FuncDef => index_func_def(file, node, sink),
        _ => {}
    }
}

fn index_doc_class(file: &SourceFile, doc: NodeId, sink: &Sink<'_>) {
    let Some(name) = file.name_of(doc) else {
        return;
    };
    let name = SmolStr::new(name);
    sink.occurrence(IndexKey::Class(name.clone()), doc);
    sink.occurrence(IndexKey::ShortName(name), doc);
}

fn index_doc_field(file: &SourceFile, field: NodeId, sink: &Sink<'_>) {
    let tree = file.tree();
    let Some(name) = file.name_of(field) else {
        return;
    };

    let class_name = match tree.child_of_kind(field, NodeKind::DocClassRef) {
        Some(class_ref) => file.name_of(class_ref),
        None => tree
            .ancestor_of_kind(field, NodeKind::Comment)
            .and_then(|comment| tree.child_of_kind(comment, NodeKind::DocClassDef))
            .and_then(|class_def| file.name_of(class_def)),
    };
    let Some(class_name) = class_name else {
        return;
    };

    sink.occurrence(IndexKey::ClassMember(member_key(class_name)), field);
    sink.occurrence(
        IndexKey::ClassMember(member_key_of(class_name, name)),
        field,
    );
    sink.occurrence(IndexKey::ShortName(SmolStr::new(name)), field);
}

fn index_method(file: &SourceFile, method: NodeId, oracle: &dyn TypeOracle, sink: &Sink<'_>) {
    let tree = file.tree();
    let Some(name_id) = tree.child_of_kind(method, NodeKind::Ident) else {
        return;
    };
    let Some(receiver) = tree
        .children(method)
        .iter()
        .copied()
        .find(|&c| matches!(tree.kind(c), NodeKind::NameExpr | NodeKind::IndexExpr))
    else {
        return;
    };

    let ctx = InferContext::for_index(file.id());
    let mut class_names = dedup(oracle.infer_types(receiver, ctx));
    if class_names.is_empty() {
        // Degraded mode: an unresolved receiver is still indexed under its
        // source text, trading precision for recall.
        tracing::trace!(
            receiver = file.text(receiver),
            "receiver type unresolved, indexing under its spelling"
        );
        class_names.push(SmolStr::new(file.text(receiver)));
    }

    let name = file.text(name_id);
    for class_name in class_names {
        sink.occurrence(IndexKey::ClassMember(member_key(&class_name)), method);
        sink.occurrence(
            IndexKey::ClassMember(member_key_of(&class_name, name)),
            method,
        );
        sink.occurrence(IndexKey::ShortName(class_name), method);
    }
}

fn index_index_expr(file: &SourceFile, expr: NodeId, oracle: &dyn TypeOracle, sink: &Sink<'_>) {
    let tree = file.tree();
    if assign_stat_of_target(file, expr).is_none() {
        return;
    }
    let Some(name_id) = tree.child_of_kind(expr, NodeKind::Ident) else {
        return;
    };
    let Some(base) = tree
        .children(expr)
        .iter()
        .copied()
        .find(|&c| c != name_id)
    else {
        return;
    };

    let ctx = InferContext::for_index(file.id());
    let class_names = dedup(oracle.infer_types(base, ctx));

    let name = file.text(name_id);
    for class_name in class_names {
        sink.occurrence(IndexKey::ClassMember(member_key(&class_name)), expr);
        sink.occurrence(
            IndexKey::ClassMember(member_key_of(&class_name, name)),
            expr,
        );
        sink.occurrence(IndexKey::ShortName(SmolStr::new(name)), expr);
    }
}

fn index_table_expr(_file: &SourceFile, _table: NodeId, _sink: &Sink<'_>) {
    // Disabled: a table literal does not declare a class on its own. Kept as
    // the extension point for synthetic table types.
}

fn index_table_field(file: &SourceFile, field: NodeId, oracle: &dyn TypeOracle, sink: &Sink<'_>) {
    let tree = file.tree();
    let Some(name_id) = tree.child_of_kind(field, NodeKind::Ident) else {
        return;
    };
    let Some(class_name) = table_expr_type_name(file, field, oracle) else {
        return;
    };

    let name = file.text(name_id);
    sink.occurrence(IndexKey::ClassMember(member_key(&class_name)), field);
    sink.occurrence(
        IndexKey::ClassMember(member_key_of(&class_name, name)),
        field,
    );
    sink.occurrence(IndexKey::ShortName(SmolStr::new(name)), field);
}

/// The type name a table field belongs to: the declared type of the
/// assignment target when the enclosing table literal is the sole value of
/// an assignment, otherwise a synthetic name derived from the literal's own
/// position.
fn table_expr_type_name(
    file: &SourceFile,
    field: NodeId,
    oracle: &dyn TypeOracle,
) -> Option<SmolStr> {
    let tree = file.tree();
    let table = tree.ancestor_of_kind(field, NodeKind::TableExpr)?;

    if let Some(values) = tree.parent(table).filter(|&p| tree.kind(p) == NodeKind::ExprList) {
        if let Some(stat) = tree
            .parent(values)
            .filter(|&p| tree.kind(p) == NodeKind::AssignStat)
        {
            let is_sole_value = tree.children(stat).last() == Some(&values)
                && tree.children(values) == [table];
            if is_sole_value {
                let target = tree
                    .child_of_kind(stat, NodeKind::ExprList)
                    .filter(|&targets| targets != values)
                    .and_then(|targets| tree.children(targets).first().copied());
                if let Some(target) = target {
                    let ctx = InferContext::for_index(file.id());
                    if let Some(class_name) = oracle.infer_types(target, ctx).into_iter().next() {
                        return Some(class_name);
                    }
                }
            }
        }
    }

    Some(table_type_name(file, table))
}

/// Synthetic structural name for an untyped table literal.
fn table_type_name(file: &SourceFile, table: NodeId) -> SmolStr {
    let start = file.tree().span(table).start;
    SmolStr::new(format!("{}@({})table", file.name(), start))
}

fn index_name_expr(file: &SourceFile, expr: NodeId, sink: &Sink<'_>) {
    if assign_stat_of_target(file, expr).is_none() {
        return;
    }
    let Some(name) = file.name_of(expr) else {
        return;
    };
    if resolve_local(file, expr).is_some() {
        // Assignments to locals are not members of anything.
        return;
    }

    sink.occurrence(IndexKey::ClassMember(member_key(GLOBAL_CLASS)), expr);
    sink.occurrence(
        IndexKey::ClassMember(member_key_of(GLOBAL_CLASS, name)),
        expr,
    );
    sink.occurrence(IndexKey::ShortName(SmolStr::new(name)), expr);
}

fn index_func_def(file: &SourceFile, func: NodeId, sink: &Sink<'_>) {
    let tree = file.tree();
    let Some(name_id) = tree.child_of_kind(func, NodeKind::Ident) else {
        return;
    };

    // Module-qualified attribution stays disabled: top-level functions are
    // members of the global pseudo-class regardless of the owning file.
    let module_name = GLOBAL_CLASS;
    let name = file.text(name_id);

    sink.occurrence(IndexKey::ClassMember(member_key(module_name)), func);
    sink.occurrence(
        IndexKey::ClassMember(member_key_of(module_name, name)),
        func,
    );
    sink.occurrence(IndexKey::ShortName(SmolStr::new(name)), func);
}

/// The assignment statement `expr` is a target of, if any.
///
/// Only direct members of an assignment's target list qualify; expressions
/// in value position or nested deeper return `None`.
fn assign_stat_of_target(file: &SourceFile, expr: NodeId) -> Option<NodeId> {
    let tree = file.tree();
    let targets = tree
        .parent(expr)
        .filter(|&p| tree.kind(p) == NodeKind::ExprList)?;
    let stat = tree
        .parent(targets)
        .filter(|&p| tree.kind(p) == NodeKind::AssignStat)?;
    (tree.children(stat).first() == Some(&targets)).then_some(stat)
}

fn dedup(class_names: Vec<SmolStr>) -> Vec<SmolStr> {
    let mut out: Vec<SmolStr> = Vec::with_capacity(class_names.len());
    for name in class_names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
