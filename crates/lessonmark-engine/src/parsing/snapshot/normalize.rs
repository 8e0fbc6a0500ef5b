use serde::Serialize;
use xi_rope::Rope;

use crate::parsing::{
    ParsedLesson,
    cells::{CellBody, Metadata},
    rope::slice::preview,
};

/// Snapshot of a parsed lesson for testing with `insta`.
#[derive(Serialize)]
pub struct Snap {
    pub metadata: Metadata,
    pub cells: Vec<CellSnap>,
}

/// Snapshot of a single cell for testing.
#[derive(Serialize)]
pub struct CellSnap {
    /// Cell kind with its key detail, e.g. `Code(python)`, `Quiz(answer=1)`,
    /// `Unknown(foo)`.
    pub kind: String,
    /// Byte span as (start, end) tuple.
    pub span: (usize, usize),
    /// Preview of the cell's source text (truncated for readability).
    pub text: String,
}

/// Converts a parsed lesson into a serializable snapshot for testing.
pub fn normalize(rope: &Rope, lesson: &ParsedLesson) -> Snap {
    let cells = lesson
        .cells
        .iter()
        .map(|cell| {
            let kind = match &cell.body {
                CellBody::Text { .. } => "Text".to_string(),
                CellBody::Code { language, .. } => format!("Code({language})"),
                CellBody::Quiz {
                    options,
                    correct_answer,
                    ..
                } => format!("Quiz({} options, answer={correct_answer})", options.len()),
                CellBody::Unknown { data, .. } => {
                    format!("Unknown({})", data.declared_type.as_deref().unwrap_or(""))
                }
            };

            CellSnap {
                kind,
                span: (cell.span.start, cell.span.end),
                text: preview(rope, cell.span, 40),
            }
        })
        .collect();

    Snap {
        metadata: lesson.metadata.clone(),
        cells,
    }
}
