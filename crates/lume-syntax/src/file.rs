//! Source files.

use smol_str::SmolStr;

use crate::node::NodeKind;
use crate::tree::{NodeId, SyntaxTree, TextSpan};

index_vec::define_index_type! {
    /// A unique ID for a source file within one tooling session
    pub struct FileId = usize;

    MAX_INDEX = usize::MAX;
}

impl FileId {
    pub const fn as_usize(self) -> usize {
        self.raw()
    }
}

/// A unit of source text together with its parsed tree.
///
/// The file owns the text its tree's spans point into, which makes it the
/// natural place for text access: `file.text(node)` is the node's spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    id: FileId,
    name: SmolStr,
    source: String,
    tree: SyntaxTree,
}

impl SourceFile {
    pub fn new(id: FileId, name: impl Into<SmolStr>, source: impl Into<String>, tree: SyntaxTree) -> Self {
        Self {
            id,
            name: name.into(),
            source: source.into(),
            tree,
        }
    }

    pub const fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// The source text covered by `node`'s span.
    pub fn text(&self, node: NodeId) -> &str {
        self.slice(self.tree.span(node))
    }

    /// The source text covered by an arbitrary span.
    pub fn slice(&self, span: TextSpan) -> &str {
        &self.source[span.start..span.end]
    }

    /// The spelling of `node`'s name identifier: the text of its `Ident`
    /// child, or of the node itself when it is a leaf (e.g. a bare name
    /// expression). Returns `None` for composite nodes without an `Ident`
    /// child and for empty spellings.
    pub fn name_of(&self, node: NodeId) -> Option<&str> {
        if let Some(id) = self.tree.child_of_kind(node, NodeKind::Ident) {
            let text = self.text(id);
            return (!text.is_empty()).then_some(text);
        }
        if self.tree.children(node).is_empty() {
            let text = self.text(node);
            return (!text.is_empty()).then_some(text);
        }
        None
    }

    /// The span of `node`'s name identifier, falling back to the node's own
    /// span when it has no `Ident` child.
    pub fn name_span(&self, node: NodeId) -> TextSpan {
        let named = self
            .tree
            .child_of_kind(node, NodeKind::Ident)
            .unwrap_or(node);
        self.tree.span(named)
    }
}
