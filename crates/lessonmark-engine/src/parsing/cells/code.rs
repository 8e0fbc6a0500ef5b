use super::types::{Attributes, CellBody};
use crate::parsing::blocks::{BlockMarker, RawBlock};

/// Header attributes that name a code cell's language, in precedence order.
const LANGUAGE_KEYS: [&str; 2] = ["language", "lang"];

/// Builds a code cell. Never fails: a missing language is the empty string.
pub(crate) fn build(block: &RawBlock, attributes: &Attributes) -> CellBody {
    let language = match &block.marker {
        BlockMarker::Fence { language, .. } => language.clone(),
        BlockMarker::Header { .. } | BlockMarker::Implicit => LANGUAGE_KEYS
            .iter()
            .find_map(|k| attributes.get(*k))
            .cloned()
            .unwrap_or_default(),
    };

    CellBody::Code {
        language,
        content: block.content.clone(),
    }
}
