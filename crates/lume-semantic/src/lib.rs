//! # Lume Semantic Indexing
//!
//! This crate is the symbol-indexing and cross-reference core of the Lume
//! tooling backend. Given a parsed file, it builds a searchable index mapping
//! class names, member names and short identifier names to the syntax nodes
//! that declare or touch them, reconciling the language's dynamic object
//! model (classes declared via documentation comments, tables acting as
//! records, global functions acting as module members) into one queryable
//! symbol graph.
//!
//! ## Architecture
//!
//! 1. **Symbol index**: four parallel key spaces (class, class member, super
//!    class, short name) holding per-file occurrence records
//! 2. **File indexer**: one pre-order walk per file, guarded by a per-file
//!    indexing state machine, dispatching recognized node kinds to the
//!    occurrence emitter
//! 3. **Type oracle**: a black-box inference seam returning candidate class
//!    names for an expression; zero candidates is a valid answer everywhere
//!
//! ## Main entry point
//!
//! [`index_file`] indexes one file into a [`SymbolIndex`]; re-indexing after
//! an edit is `remove_stubs` + state reset + `index_file`.

pub mod indexer;
pub mod oracle;
pub mod scope;
pub mod symbol_index;

pub use indexer::{index_file, IndexState};
pub use oracle::{FunctionSig, InferContext, NullOracle, TypeOracle};
pub use scope::resolve_local;
pub use symbol_index::{
    member_key, member_key_of, IndexKey, Occurrence, SymbolIndex, GLOBAL_CLASS,
};
