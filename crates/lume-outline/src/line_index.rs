//! Offset to line/character conversion.

use lsp_types::{Position, Range};
use lume_syntax::TextSpan;

/// Precomputed line starts for one source text.
///
/// Characters are counted per line (not bytes), matching how the editor
/// protocol positions are produced elsewhere in the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    /// Convert a byte offset into `text` to a line/character position.
    pub fn position(&self, text: &str, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = text[line_start..offset].chars().count();
        Position::new(line as u32, character as u32)
    }

    /// Convert a byte span into `text` to a position range.
    pub fn range(&self, text: &str, span: TextSpan) -> Range {
        Range::new(
            self.position(text, span.start),
            self.position(text, span.end),
        )
    }
}
