//! # Lume Document Outline
//!
//! Builds per-file outlines (document symbols) for the presentation layer:
//! a nested tree of named, typed, ranged symbols derived from the syntax
//! tree, plus flat symbol entries for fuzzy/global symbol search results.
//!
//! The outline is computed fresh per request and never cached; it shares the
//! type oracle with the indexing core but is independent of the symbol
//! index. Long requests are cooperatively cancellable through a
//! [`CancelToken`] checked at every visited node.

pub mod cancel;
pub mod line_index;
pub mod outline;

pub use cancel::{CancelToken, Canceled};
pub use line_index::LineIndex;
pub use outline::{document_symbols, flat_symbol, FlatSymbol};
