use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text, including its line terminator.
    pub text: String,
}

impl LineRef {
    /// The line text without its trailing `\n` / `\r\n`.
    pub fn trimmed(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }

    /// Byte offset just past the visible text, before the line terminator.
    pub fn content_end(&self) -> usize {
        self.span.start + self.trimmed().len()
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, so spans tile the rope
/// exactly and cell spans can be sliced back out of the source.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        let len = line.len();
        offset += len;
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
