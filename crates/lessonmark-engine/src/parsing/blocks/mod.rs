//! # Block Segmentation
//!
//! Two-phase segmentation of a lesson body into raw blocks.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (blank, `---` delimiter, `key: value` entry, fence signature)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` walks the classified lines
//!    and emits `RawBlock`s as cell headers, fences and text runs open and close
//!
//! ## Modules
//!
//! - **`types`**: `RawBlock` and its `BlockMarker`
//! - **`kinds`**: Marker syntax with owned delimiters (`CellHeader`, `CodeFence`)
//! - **`classify`**: `LessonLineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open_block` dispatch for detecting block openers, and the
//!   per-document `FenceIndex` of fence closers
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Blocks come out in source order with disjoint spans
//! - Fenced code blocks are raw zones: no marker detection inside
//! - A fence never spans a cell header; its closer must come first
//! - A marker that does not complete (unterminated fence, `---` without a
//!   typed header) is literal text of the enclosing block
//! - Bytes outside every block span are blank separator lines

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LessonLineClassifier, LineClass, classify_all};
pub use types::{BlockMarker, RawBlock};
