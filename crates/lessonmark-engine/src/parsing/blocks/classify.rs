use xi_rope::Rope;

use crate::parsing::rope::{LineRef, Span, lines_with_spans};

use super::kinds::{CellHeader, CodeFence, FenceSig, HeaderEntry};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line in the rope, terminator included.
    pub line: Span,
    /// Byte offset where the visible text ends (before `\r\n` / `\n`).
    pub content_end: usize,
    /// Visible text of the line.
    pub text: String,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Whether the line is a `---` delimiter.
    pub is_delimiter: bool,
    /// If the line is a column-0 `key: value` entry.
    pub entry: Option<HeaderEntry>,
    /// If the line looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig>,
}

/// Classifies individual lines for the block parsing phase.
pub struct LessonLineClassifier;

impl LessonLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let text = lr.trimmed();

        LineClass {
            line: lr.span,
            content_end: lr.content_end(),
            text: text.to_string(),
            is_blank: text.trim().is_empty(),
            is_delimiter: CellHeader::is_delimiter(text),
            entry: CellHeader::entry(text),
            fence_sig: CodeFence::sig(text),
        }
    }
}

/// Classifies every line of the rope in order.
pub fn classify_all(rope: &Rope) -> Vec<LineClass> {
    let classifier = LessonLineClassifier;
    lines_with_spans(rope)
        .map(|lr| classifier.classify(&lr))
        .collect()
}
