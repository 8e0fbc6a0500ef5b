use xi_rope::Rope;

use crate::parsing::{
    options::ParseOptions,
    rope::{slice::slice_to_string, span::Span},
};

use super::{
    classify::LineClass,
    kinds::{FenceSig, HeaderMatch},
    open::{BlockOpen, FenceIndex, try_open_block},
    types::{BlockMarker, RawBlock},
};

/// Declared type of a text run with no marker.
pub const IMPLICIT_TYPE: &str = "text";
/// Declared type of a fence whose language is not a quiz name.
pub const FENCED_CODE_TYPE: &str = "code";

#[derive(Debug, Clone)]
enum LeafState {
    None,
    /// Implicit text run; `first`/`last` are its first and last non-blank lines.
    Text { first: usize, last: usize },
    /// Header-declared cell; `last` is its last non-blank line (the closing
    /// delimiter while the body is still empty).
    Declared { header: HeaderMatch, last: usize },
}

/// Splits classified lines into [`RawBlock`]s in source order.
///
/// Every line ends up either inside exactly one block or as a blank
/// separator between blocks. Malformed markers fall through to text.
pub struct BlockBuilder<'a> {
    rope: &'a Rope,
    lines: &'a [LineClass],
    options: &'a ParseOptions,
    fence_index: FenceIndex,
    leaf: LeafState,
    out: Vec<RawBlock>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(rope: &'a Rope, lines: &'a [LineClass], options: &'a ParseOptions) -> Self {
        Self {
            rope,
            lines,
            options,
            fence_index: FenceIndex::new(lines),
            leaf: LeafState::None,
            out: vec![],
        }
    }

    /// Segments `lines[start..]`.
    pub fn run(mut self, start: usize) -> Vec<RawBlock> {
        let mut i = start;
        while i < self.lines.len() {
            i = self.push(i);
        }
        self.finish()
    }

    /// Consumes the line at `i` (and any lines an opener spans), returning
    /// the index of the next unconsumed line.
    fn push(&mut self, i: usize) -> usize {
        let fences = self.options.fenced_cells && !self.in_declared();
        if let Some(open) = try_open_block(self.lines, &self.fence_index, i, fences) {
            self.flush();
            return self.open_block(open);
        }

        let line = &self.lines[i];
        if line.is_blank {
            return i + 1;
        }

        match &mut self.leaf {
            LeafState::Declared { last, .. } | LeafState::Text { last, .. } => *last = i,
            leaf @ LeafState::None => *leaf = LeafState::Text { first: i, last: i },
        }
        i + 1
    }

    fn finish(mut self) -> Vec<RawBlock> {
        // EOF flush
        self.flush();
        self.out
    }

    fn in_declared(&self) -> bool {
        matches!(self.leaf, LeafState::Declared { .. })
    }

    fn open_block(&mut self, open: BlockOpen) -> usize {
        match open {
            BlockOpen::CellHeader(header) => {
                let next = header.close + 1;
                let last = header.close;
                self.leaf = LeafState::Declared { header, last };
                next
            }
            BlockOpen::FencedCode { sig, open, close } => {
                self.emit_fence(&sig, open, close);
                close + 1
            }
        }
    }

    fn emit_fence(&mut self, sig: &FenceSig, open: usize, close: usize) {
        let span = Span::new(self.lines[open].line.start, self.lines[close].content_end);
        let content_span = if close > open + 1 {
            Span::new(self.lines[open + 1].line.start, self.lines[close - 1].content_end)
        } else {
            let at = self.lines[open].content_end;
            Span::new(at, at)
        };

        let language = sig.language().to_string();
        let declared_type = if self.options.is_quiz_type(&language) {
            language.clone()
        } else {
            FENCED_CODE_TYPE.to_string()
        };

        let marker = BlockMarker::Fence {
            kind: sig.kind,
            language,
            info: sig.info.clone(),
        };
        self.emit(declared_type, marker, span, content_span);
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Text { first, last } => {
                let span = Span::new(self.lines[first].line.start, self.lines[last].content_end);
                self.emit(IMPLICIT_TYPE.to_string(), BlockMarker::Implicit, span, span);
            }
            LeafState::Declared { header, last } => {
                let span = Span::new(
                    self.lines[header.open].line.start,
                    self.lines[last].content_end,
                );
                let content_span = if last > header.close {
                    Span::new(self.lines[header.close + 1].line.start, span.end)
                } else {
                    Span::new(span.end, span.end)
                };
                let declared_type = header.declared_type().to_string();
                let marker = BlockMarker::Header {
                    entries: header.entries,
                };
                self.emit(declared_type, marker, span, content_span);
            }
        }
    }

    fn emit(&mut self, declared_type: String, marker: BlockMarker, span: Span, content_span: Span) {
        self.out.push(RawBlock {
            declared_type,
            marker,
            span,
            content_span,
            raw_text: slice_to_string(self.rope, span),
            content: slice_to_string(self.rope, content_span),
        });
    }
}
