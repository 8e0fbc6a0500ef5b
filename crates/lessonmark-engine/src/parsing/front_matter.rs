use xi_rope::Rope;

use crate::parsing::{
    blocks::{LineClass, classify_all, kinds::CellHeader},
    cells::Metadata,
};

/// Marker of an indented list item under an empty-valued key.
const LIST_ITEM: &str = "- ";
/// Marker of a comment line inside front matter.
const COMMENT: char = '#';

/// The result of scanning a document's leading front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub metadata: Metadata,
    /// Index of the first line belonging to the body.
    pub body_start: usize,
}

impl FrontMatter {
    /// Reads front matter from the top of `lines`.
    ///
    /// Front matter is present only when the first line is `---`, a closing
    /// `---` follows, and the enclosed lines hold at least one entry and
    /// nothing but entries (well-formed or not), indented list items,
    /// comments and blank lines. A `type` entry makes the section a cell
    /// header instead. Otherwise the metadata is empty and the body starts
    /// at line 0, so prose between two leading rules stays body text.
    pub fn extract(lines: &[LineClass]) -> Self {
        let Some(close) = Self::closing_delimiter(lines) else {
            return Self::default();
        };

        let inner = &lines[1..close];
        if !inner.iter().any(|l| l.entry.is_some())
            || !inner.iter().all(Self::is_front_matter_line)
            || inner
                .iter()
                .any(|l| l.entry.as_ref().is_some_and(|e| e.key == CellHeader::TYPE_KEY))
        {
            return Self::default();
        }

        let metadata = Self::read_entries(inner);

        // The closing `---` doubles as the opener of the first cell header.
        let body_start = if CellHeader::scan(lines, close).is_some() {
            close
        } else {
            close + 1
        };

        Self {
            metadata,
            body_start,
        }
    }

    fn is_front_matter_line(line: &LineClass) -> bool {
        let trimmed = line.text.trim_start();
        let indented = line.text.starts_with([' ', '\t']);
        line.is_blank
            || line.entry.is_some()
            || trimmed.starts_with(COMMENT)
            || (indented && trimmed.starts_with(LIST_ITEM))
            || (!indented && Self::is_malformed_entry(&line.text))
    }

    /// A column-0 line whose first word carries a `:`, such as `key:value`
    /// or `2nd: x`. Skipped inside front matter; prose lines are not.
    fn is_malformed_entry(text: &str) -> bool {
        text.split_whitespace()
            .next()
            .is_some_and(|word| word.contains(':'))
    }

    fn closing_delimiter(lines: &[LineClass]) -> Option<usize> {
        if !lines.first()?.is_delimiter {
            return None;
        }
        lines
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, l)| l.is_delimiter)
            .map(|(i, _)| i)
    }

    fn read_entries(lines: &[LineClass]) -> Metadata {
        let mut metadata = Metadata::new();
        // Key whose empty value is collecting list items.
        let mut list_key: Option<String> = None;

        for (offset, line) in lines.iter().enumerate() {
            if line.is_blank {
                continue;
            }

            if let Some(entry) = &line.entry {
                list_key = entry.value.is_empty().then(|| entry.key.clone());
                metadata.insert(entry.key.clone(), entry.value.clone());
                continue;
            }

            let indented = line.text.starts_with([' ', '\t']);
            let item = line.text.trim_start().strip_prefix(LIST_ITEM);
            match (indented, item, &list_key) {
                (true, Some(item), Some(key)) => {
                    let item = CellHeader::unquote(item.trim());
                    let value = metadata.entry(key.clone()).or_default();
                    if !value.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(item);
                }
                _ => {
                    log::debug!(
                        "skipping front matter line {}: {:?}",
                        offset + 2,
                        line.text
                    );
                }
            }
        }
        metadata
    }
}

/// Splits a raw document into its front-matter metadata and the remaining body.
///
/// Never fails: a document without front matter yields empty metadata and
/// the whole input as body.
pub fn extract_metadata(raw: &str) -> (Metadata, &str) {
    let rope = Rope::from(raw);
    let lines = classify_all(&rope);
    let FrontMatter {
        metadata,
        body_start,
    } = FrontMatter::extract(&lines);

    let offset = lines.get(body_start).map_or(raw.len(), |l| l.line.start);
    (metadata, &raw[offset..])
}
