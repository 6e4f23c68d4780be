//! # Lume Syntax Tree
//!
//! This crate defines the syntax-tree model consumed by the Lume tooling
//! backend. The parser itself lives outside this workspace; what the backend
//! sees is an immutable, already-parsed tree of typed nodes with parent,
//! child and sibling navigation, plus the [`TreeBuilder`] seam through which
//! a parser (or a test) materializes trees.
//!
//! ## Architecture
//!
//! - [`NodeKind`]: closed enum over the node kinds the backend recognizes
//! - [`SyntaxTree`]: arena storage with spans and navigation helpers
//! - [`TreeBuilder`]: push-style construction of a tree over a source text
//! - [`SourceFile`]: a named unit of source text owning its tree

pub mod file;
pub mod node;
pub mod tree;

pub use file::{FileId, SourceFile};
pub use node::NodeKind;
pub use tree::{NodeId, Preorder, SyntaxTree, TextSpan, TreeBuilder};
