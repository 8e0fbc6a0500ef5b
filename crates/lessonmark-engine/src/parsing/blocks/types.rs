use std::collections::BTreeMap;

use crate::parsing::rope::span::Span;

use super::kinds::{CellHeader, FenceKind, HeaderEntry};

/// How a raw block was delimited in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMarker {
    /// A text run with no marker of its own.
    Implicit,
    /// A fenced block; `language` is the first word of the info string.
    Fence {
        kind: FenceKind,
        language: String,
        info: String,
    },
    /// A cell declared by a `---` header.
    Header { entries: Vec<HeaderEntry> },
}

/// A raw, untyped span of source text, prior to typed cell construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// `text` for implicit runs, `code` or the quiz fence name for fences,
    /// the `type` value for header-declared cells.
    pub declared_type: String,
    pub marker: BlockMarker,
    /// Full byte span of the block including its markers.
    pub span: Span,
    /// Byte span of the body, markers excluded.
    pub content_span: Span,
    /// Exact source text of `span`.
    pub raw_text: String,
    /// Exact source text of `content_span`.
    pub content: String,
}

impl RawBlock {
    /// Header entries other than `type`, last write wins. Empty for
    /// implicit and fenced blocks.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        match &self.marker {
            BlockMarker::Header { entries } => entries
                .iter()
                .filter(|e| e.key != CellHeader::TYPE_KEY)
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect(),
            BlockMarker::Implicit | BlockMarker::Fence { .. } => BTreeMap::new(),
        }
    }
}
