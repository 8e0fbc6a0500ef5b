use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// This allocates; prefer working with spans where possible.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let end = sp.end.min(rope.len());
    let start = sp.start.min(end);
    rope.slice_to_cow(start..end).into_owned()
}

/// Extracts text for a span, truncating to at most `max` bytes with "..." suffix if needed.
///
/// Truncation backs off to a char boundary. Used for human-readable snapshot output.
pub fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let mut s = slice_to_string(rope, sp);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
