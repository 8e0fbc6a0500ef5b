//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a `ParsedLesson` to a stable, serializable `Snap` format
//!   for `insta` snapshot testing
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds and
//!   ordered, uncovered bytes are whitespace, unknown cells keep their source text,
//!   quiz answers index their options)
//!
//! Parsing behavior is pinned by fixture snapshots rather than a separate formal
//! grammar. Snapshots record cell kinds, spans and a text preview.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
