use std::collections::BTreeMap;

use serde::Serialize;

use crate::parsing::rope::span::Span;

/// Front-matter metadata. Keys are unique; the last occurrence wins.
pub type Metadata = BTreeMap<String, String>;

/// Extra `key: value` pairs from a cell header, `type` excluded.
pub type Attributes = BTreeMap<String, String>;

/// The result of parsing one lesson document.
///
/// Produced fresh on every parse and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedLesson {
    pub metadata: Metadata,
    /// Cells in document order.
    pub cells: Vec<LessonCell>,
}

impl ParsedLesson {
    /// Cells whose block could not be built into a typed cell.
    pub fn unknown_cells(&self) -> impl Iterator<Item = &LessonCell> {
        self.cells.iter().filter(|c| c.is_unknown())
    }
}

/// One renderable unit of lesson content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonCell {
    #[serde(flatten)]
    pub body: CellBody,
    /// Source span of the whole block, markers included.
    pub span: Span,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl LessonCell {
    pub fn is_unknown(&self) -> bool {
        matches!(self.body, CellBody::Unknown { .. })
    }

    /// The wire name of the cell's variant.
    pub fn kind(&self) -> &'static str {
        match self.body {
            CellBody::Text { .. } => "text",
            CellBody::Code { .. } => "code",
            CellBody::Quiz { .. } => "quiz",
            CellBody::Unknown { .. } => "unknown",
        }
    }
}

/// The typed content of a cell. Closed: renderers match it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellBody {
    /// Prose, passed through untouched.
    Text { content: String },
    /// Literal code with its language tag (empty when unspecified).
    Code { language: String, content: String },
    /// A multiple-choice question. `correct_answer` always indexes `options`.
    Quiz {
        question: String,
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        correct_answer: usize,
    },
    /// A block that could not be typed, kept verbatim.
    Unknown {
        data: UnknownData,
        #[serde(rename = "rawContent")]
        raw_content: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnknownData {
    /// The type the block declared, if it declared one.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl UnknownData {
    pub fn declared(declared_type: &str) -> Self {
        let declared_type = declared_type.trim();
        Self {
            declared_type: (!declared_type.is_empty()).then(|| declared_type.to_string()),
        }
    }
}
