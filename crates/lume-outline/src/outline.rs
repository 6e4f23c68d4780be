//! # Outline Builder
//!
//! Dispatch by node kind mirrors the indexer's recognized declaration kinds:
//! methods, local declarations, local functions, top-level functions and
//! closures produce symbols; blocks and anything unrecognized are descended
//! through, with results appended in visitation order. Each produced symbol
//! recurses into its own subtree to populate `children`.

use lsp_types::{DocumentSymbol, Range, SymbolKind};

use lume_semantic::{InferContext, TypeOracle};
use lume_syntax::{NodeId, NodeKind, SourceFile, TextSpan};

use crate::cancel::{CancelToken, Canceled};
use crate::line_index::LineIndex;

/// Build the nested outline of `scope`'s subtree, one level per symbol.
///
/// `scope` is usually the file's root node; the builder walks its children,
/// descending through containers, and nests further symbols under the
/// declaration that owns them.
pub fn document_symbols(
    file: &SourceFile,
    lines: &LineIndex,
    scope: NodeId,
    oracle: &dyn TypeOracle,
    token: &CancelToken,
) -> Result<Vec<DocumentSymbol>, Canceled> {
    let _span = tracing::trace_span!("document_symbols", file = %file.name()).entered();
    child_symbols(file, lines, scope, oracle, token)
}

fn child_symbols(
    file: &SourceFile,
    lines: &LineIndex,
    scope: NodeId,
    oracle: &dyn TypeOracle,
    token: &CancelToken,
) -> Result<Vec<DocumentSymbol>, Canceled> {
    let mut symbols = Vec::new();
    collect(file, lines, scope, oracle, token, &mut symbols)?;
    Ok(symbols)
}

fn collect(
    file: &SourceFile,
    lines: &LineIndex,
    node: NodeId,
    oracle: &dyn TypeOracle,
    token: &CancelToken,
    out: &mut Vec<DocumentSymbol>,
) -> Result<(), Canceled> {
    let tree = file.tree();
    for &child in tree.children(node) {
        token.check()?;
        match tree.kind(child) {
            NodeKind::ClassMethodDef => {
                if let Some(symbol) = method_symbol(file, lines, child, oracle, token)? {
                    out.push(symbol);
                }
            }
            NodeKind::LocalDef => {
                for def in tree.children_of_kind(child, NodeKind::NameDef) {
                    let name = format!("local {}", file.text(def));
                    let symbol = named_symbol(
                        file, lines, def, name,
                        SymbolKind::VARIABLE,
                        oracle, token,
                    )?;
                    out.push(symbol);
                }
            }
            NodeKind::LocalFuncDef => {
                if let Some(name) = file.name_of(child) {
                    let name = format!("local function {name}");
                    out.push(named_symbol(
                        file, lines, child, name,
                        SymbolKind::FUNCTION,
                        oracle, token,
                    )?);
                }
            }
            NodeKind::FuncDef => {
                if let Some(name) = file.name_of(child) {
                    let name = format!("function {name}");
                    out.push(named_symbol(
                        file, lines, child, name,
                        SymbolKind::FUNCTION,
                        oracle, token,
                    )?);
                }
            }
            NodeKind::ClosureExpr => {
                let range = lines.range(file.source(), tree.span(child));
                let name = format!("function{}", param_signature(file, child));
                let children = child_symbols(file, lines, child, oracle, token)?;
                out.push(symbol(name, SymbolKind::FUNCTION, range, range, children));
            }
            _ => collect(file, lines, child, oracle, token, out)?,
        }
    }
    Ok(())
}

/// A method symbol is produced only when inference sees a function type at
/// the declaration; its display name is the receiver-qualified method name
/// plus the inferred parameter signature.
fn method_symbol(
    file: &SourceFile,
    lines: &LineIndex,
    method: NodeId,
    oracle: &dyn TypeOracle,
    token: &CancelToken,
) -> Result<Option<DocumentSymbol>, Canceled> {
    let tree = file.tree();
    let Some(name_id) = tree.child_of_kind(method, NodeKind::Ident) else {
        return Ok(None);
    };
    let ctx = InferContext {
        file: file.id(),
        for_write: false,
    };
    let Some(sig) = oracle.infer_function(method, ctx) else {
        return Ok(None);
    };

    let qualified_start = tree
        .children(method)
        .iter()
        .copied()
        .find(|&c| matches!(tree.kind(c), NodeKind::NameExpr | NodeKind::IndexExpr))
        .map_or(tree.span(name_id).start, |receiver| tree.span(receiver).start);
    let qualified = file.slice(TextSpan::new(qualified_start, tree.span(name_id).end));

    let range = lines.range(file.source(), tree.span(method));
    let selection = lines.range(file.source(), tree.span(name_id));
    let children = child_symbols(file, lines, method, oracle, token)?;
    Ok(Some(symbol(
        format!("{qualified}{}", sig.param_signature()),
        SymbolKind::METHOD,
        range,
        selection,
        children,
    )))
}

fn named_symbol(
    file: &SourceFile,
    lines: &LineIndex,
    node: NodeId,
    name: String,
    kind: SymbolKind,
    oracle: &dyn TypeOracle,
    token: &CancelToken,
) -> Result<DocumentSymbol, Canceled> {
    let range = lines.range(file.source(), file.tree().span(node));
    let selection = lines.range(file.source(), file.name_span(node));
    let children = child_symbols(file, lines, node, oracle, token)?;
    Ok(symbol(name, kind, range, selection, children))
}

#[allow(deprecated)]
fn symbol(
    name: String,
    kind: SymbolKind,
    range: Range,
    selection_range: Range,
    children: Vec<DocumentSymbol>,
) -> DocumentSymbol {
    DocumentSymbol {
        name,
        detail: None,
        kind,
        tags: None,
        deprecated: None,
        range,
        selection_range,
        children: Some(children),
    }
}

/// The syntactic parameter signature of a function-defining node: `(a, b)`.
fn param_signature(file: &SourceFile, func: NodeId) -> String {
    let tree = file.tree();
    let mut out = String::from("(");
    if let Some(params) = tree.child_of_kind(func, NodeKind::ParamList) {
        for (i, def) in tree.children_of_kind(params, NodeKind::NameDef).enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(file.text(def));
        }
    }
    out.push(')');
    out
}

/// A flat symbol entry for one named node, as surfaced by global symbol
/// search over the symbol index.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub selection_range: Range,
}

/// Present one index occurrence as a flat symbol. Function-body owners get
/// their syntactic parameter signature appended to the name.
pub fn flat_symbol(file: &SourceFile, lines: &LineIndex, node: NodeId) -> Option<FlatSymbol> {
    let tree = file.tree();
    let mut name = file.name_of(node)?.to_string();
    if tree.child_of_kind(node, NodeKind::ParamList).is_some() {
        name.push_str(&param_signature(file, node));
    }
    let kind = match tree.kind(node) {
        NodeKind::ClassMethodDef => SymbolKind::METHOD,
        NodeKind::DocFieldDef | NodeKind::TableField => SymbolKind::FIELD,
        NodeKind::DocClassDef => SymbolKind::CLASS,
        NodeKind::FuncDef | NodeKind::LocalFuncDef | NodeKind::ClosureExpr => SymbolKind::FUNCTION,
        _ => SymbolKind::VARIABLE,
    };
    Some(FlatSymbol {
        name,
        kind,
        range: lines.range(file.source(), tree.span(node)),
        selection_range: lines.range(file.source(), file.name_span(node)),
    })
}
