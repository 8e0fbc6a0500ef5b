use xi_rope::Rope;

use crate::parsing::{
    ParsedLesson,
    blocks::classify_all,
    cells::CellBody,
    front_matter::FrontMatter,
    rope::{Span, slice::slice_to_string},
};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All cell spans are within rope bounds and in source order, disjoint
/// - Every body byte outside a cell span is whitespace
/// - Unknown cells carry exactly the source text of their span
/// - Quiz answers index an existing option
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, lesson: &ParsedLesson) {
    let n = rope.len();
    let lines = classify_all(rope);
    let body_start = FrontMatter::extract(&lines).body_start;
    let mut covered_to = lines.get(body_start).map_or(n, |l| l.line.start);

    for cell in &lesson.cells {
        let sp = cell.span;
        assert!(
            sp.start <= sp.end && sp.end <= n,
            "cell span out of bounds: {sp:?} (rope len: {n})"
        );
        assert!(
            sp.start >= covered_to,
            "cell span overlaps previous cell or front matter: {sp:?} starts before {covered_to}"
        );

        let gap = slice_to_string(rope, Span::new(covered_to, sp.start));
        assert!(
            gap.trim().is_empty(),
            "non-whitespace outside any cell before {sp:?}: {gap:?}"
        );
        covered_to = sp.end;

        match &cell.body {
            CellBody::Unknown { raw_content, .. } => assert_eq!(
                raw_content,
                &slice_to_string(rope, sp),
                "unknown cell raw content differs from its span {sp:?}"
            ),
            CellBody::Quiz {
                options,
                correct_answer,
                ..
            } => assert!(
                *correct_answer < options.len(),
                "quiz answer {correct_answer} out of range for {} options at {sp:?}",
                options.len()
            ),
            CellBody::Text { .. } | CellBody::Code { .. } => {}
        }
    }

    let tail = slice_to_string(rope, Span::new(covered_to, n));
    assert!(
        tail.trim().is_empty(),
        "non-whitespace after the last cell: {tail:?}"
    );
}
