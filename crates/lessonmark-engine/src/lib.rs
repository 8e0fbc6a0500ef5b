pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use io::*;
pub use parsing::{
    CellBody, CellType, LessonCell, Metadata, ParseOptions, ParsedLesson, UnknownData,
    extract_metadata, parse_lesson, parse_lesson_rope, parse_lesson_with, segment_blocks,
};
