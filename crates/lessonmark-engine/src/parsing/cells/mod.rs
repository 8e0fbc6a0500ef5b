//! # Cell Construction
//!
//! Turns each [`RawBlock`] into a typed [`LessonCell`]. Total: a block that
//! cannot be built into its declared type becomes an unknown cell holding
//! the block's exact source text.

pub mod code;
pub mod error;
pub mod quiz;
pub mod types;

pub use error::CellError;
pub use types::{Attributes, CellBody, LessonCell, Metadata, ParsedLesson, UnknownData};

use crate::parsing::{
    blocks::{BlockMarker, RawBlock},
    options::{CellType, ParseOptions},
};

/// Builds the typed cell for one raw block. Never fails.
pub fn build_cell(block: &RawBlock, options: &ParseOptions) -> LessonCell {
    let attributes = block.attributes();
    let body = match try_build(block, &attributes, options) {
        Ok(body) => body,
        Err(err) => {
            log::debug!(
                "cell at {}..{} (type `{}`) kept as unknown: {}",
                block.span.start,
                block.span.end,
                block.declared_type,
                err
            );
            CellBody::Unknown {
                data: UnknownData::declared(&block.declared_type),
                raw_content: block.raw_text.clone(),
            }
        }
    };

    LessonCell {
        body,
        span: block.span,
        attributes,
    }
}

fn try_build(
    block: &RawBlock,
    attributes: &Attributes,
    options: &ParseOptions,
) -> Result<CellBody, CellError> {
    let cell_type = match &block.marker {
        BlockMarker::Implicit => CellType::Text,
        BlockMarker::Fence { language, .. } if options.is_quiz_type(language) => CellType::Quiz,
        BlockMarker::Fence { .. } => CellType::Code,
        BlockMarker::Header { .. } => options
            .cell_type(&block.declared_type)
            .ok_or_else(|| CellError::UnrecognizedType(block.declared_type.clone()))?,
    };

    match cell_type {
        CellType::Text => Ok(CellBody::Text {
            content: block.content.clone(),
        }),
        CellType::Code => Ok(code::build(block, attributes)),
        CellType::Quiz => quiz::build(&block.content, attributes),
    }
}
