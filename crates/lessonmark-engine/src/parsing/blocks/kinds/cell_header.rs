use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::classify::LineClass;

/// A single `key: value` line from a cell header or the front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

/// A recognised cell header: `---`, `key: value` lines including `type`, `---`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Line index of the opening delimiter.
    pub open: usize,
    /// Line index of the closing delimiter.
    pub close: usize,
    /// Entries in source order, duplicates included.
    pub entries: Vec<HeaderEntry>,
}

impl HeaderMatch {
    /// The value of the last `type` entry.
    pub fn declared_type(&self) -> &str {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == CellHeader::TYPE_KEY)
            .map_or("", |e| e.value.as_str())
    }
}

/// Cell header syntax. All knowledge of the `---` / `key: value` markup
/// lives here; the classifier and builder only call into it.
pub struct CellHeader;

impl CellHeader {
    pub const DELIMITER: &'static str = "---";
    pub const TYPE_KEY: &'static str = "type";

    /// A delimiter line is exactly `---`, trailing whitespace allowed.
    pub fn is_delimiter(line: &str) -> bool {
        line.trim_end() == Self::DELIMITER
    }

    /// Parses a column-0 `key: value` line. The value is trimmed and one
    /// layer of matching quotes is removed.
    pub fn entry(line: &str) -> Option<HeaderEntry> {
        static ENTRY_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ENTRY_REGEX.get_or_init(|| {
            Regex::new(r"^([A-Za-z_][A-Za-z0-9_.-]*):(?:[ \t]+(.*))?$").expect("Invalid entry regex")
        });

        let caps = re.captures(line.trim_end())?;
        let key = caps.get(1)?.as_str().to_string();
        let value = caps.get(2).map_or("", |m| m.as_str());
        Some(HeaderEntry {
            key,
            value: Self::unquote(value.trim()).to_string(),
        })
    }

    /// Strips one pair of matching surrounding `"` or `'` quotes.
    pub fn unquote(value: &str) -> &str {
        for q in ['"', '\''] {
            if value.len() >= 2
                && let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q))
            {
                return inner;
            }
        }
        value
    }

    /// Looks for a complete cell header whose opening delimiter is `lines[at]`.
    ///
    /// Returns `None` (the delimiter is then literal text) unless at least one
    /// entry follows, every line up to the closing delimiter is an entry, and
    /// one of the entries is `type`.
    pub fn scan(lines: &[LineClass], at: usize) -> Option<HeaderMatch> {
        if !lines.get(at)?.is_delimiter {
            return None;
        }

        let mut entries = Vec::new();
        let mut i = at + 1;
        while let Some(entry) = lines.get(i).and_then(|l| l.entry.as_ref()) {
            entries.push(entry.clone());
            i += 1;
        }

        let closed = lines.get(i).is_some_and(|l| l.is_delimiter);
        let typed = entries.iter().any(|e| e.key == Self::TYPE_KEY);
        if !closed || !typed {
            return None;
        }

        Some(HeaderMatch {
            open: at,
            close: i,
            entries,
        })
    }
}
