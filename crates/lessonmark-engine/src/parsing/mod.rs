//! # Lesson Parsing
//!
//! Turns raw lesson text into a [`ParsedLesson`]: front-matter metadata plus
//! an ordered list of typed cells.
//!
//! 1. **Front matter** (`front_matter`): optional leading `---` metadata
//! 2. **Segmentation** (`blocks`): the body is split into `RawBlock`s
//! 3. **Cell construction** (`cells`): each block becomes a `LessonCell`,
//!    falling back to an unknown cell when it cannot be typed
//!
//! Parsing is total. Every input, including the empty string, yields a
//! `ParsedLesson`; malformed content surfaces as unknown cells.

pub mod blocks;
pub mod cells;
pub mod front_matter;
pub mod options;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{BlockBuilder, RawBlock, classify_all};
use cells::build_cell;
use front_matter::FrontMatter;

pub use cells::{CellBody, LessonCell, Metadata, ParsedLesson, UnknownData};
pub use front_matter::extract_metadata;
pub use options::{CellType, ParseOptions};

/// Parses a lesson with the default cell type names.
pub fn parse_lesson(raw: &str) -> ParsedLesson {
    parse_lesson_with(raw, &ParseOptions::default())
}

pub fn parse_lesson_with(raw: &str, options: &ParseOptions) -> ParsedLesson {
    parse_lesson_rope(&Rope::from(raw), options)
}

/// Parses a lesson held in an editor buffer. Cell spans are byte offsets
/// into `rope`.
pub fn parse_lesson_rope(rope: &Rope, options: &ParseOptions) -> ParsedLesson {
    let lines = classify_all(rope);
    let FrontMatter {
        metadata,
        body_start,
    } = FrontMatter::extract(&lines);

    let cells = BlockBuilder::new(rope, &lines, options)
        .run(body_start)
        .iter()
        .map(|block| build_cell(block, options))
        .collect();

    ParsedLesson { metadata, cells }
}

/// Splits a document body (front matter already removed) into raw blocks.
/// Spans are relative to `body`.
pub fn segment_blocks(body: &str, options: &ParseOptions) -> Vec<RawBlock> {
    let rope = Rope::from(body);
    let lines = classify_all(&rope);
    BlockBuilder::new(&rope, &lines, options).run(0)
}
