use super::{
    classify::LineClass,
    kinds::{CellHeader, CodeFence, FenceSig, HeaderMatch},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen {
    /// A `---` / `type: ...` / `---` header declaring the next cell.
    CellHeader(HeaderMatch),
    /// A fence with a matching closer at line `close`.
    FencedCode { sig: FenceSig, open: usize, close: usize },
}

/// Where fences may close, computed once per document.
///
/// A fence never spans a cell header: the closer search for an opener stops
/// at the next line where a header starts.
#[derive(Debug, Clone)]
pub struct FenceIndex {
    /// Lines carrying a fence with no info string, in line order.
    closers: Vec<usize>,
    /// `next_header[i]` is the first header line at or after `i`, or `lines.len()`.
    next_header: Vec<usize>,
}

impl FenceIndex {
    pub fn new(lines: &[LineClass]) -> Self {
        let closers = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.fence_sig.as_ref().is_some_and(|sig| sig.info.is_empty()))
            .map(|(i, _)| i)
            .collect();

        let mut next_header = vec![lines.len(); lines.len() + 1];
        for i in (0..lines.len()).rev() {
            next_header[i] = if lines[i].is_delimiter && CellHeader::scan(lines, i).is_some() {
                i
            } else {
                next_header[i + 1]
            };
        }

        Self {
            closers,
            next_header,
        }
    }

    /// First line after `open` that closes `sig`, if one comes before the next header.
    fn find_close(&self, lines: &[LineClass], open: usize, sig: &FenceSig) -> Option<usize> {
        let bound = self.next_header.get(open + 1).copied().unwrap_or(lines.len());
        let from = self.closers.partition_point(|&i| i <= open);
        self.closers[from..]
            .iter()
            .copied()
            .take_while(|&i| i < bound)
            .find(|&i| CodeFence::closes(sig, lines[i].fence_sig.as_ref()))
    }
}

/// Detects a block opener at `lines[at]`.
///
/// Headers take precedence. Fences are only considered when `fences` is set
/// (outside header-declared cells) and only when a closing fence exists
/// before the next header; otherwise the fence line stays literal text.
pub fn try_open_block(
    lines: &[LineClass],
    index: &FenceIndex,
    at: usize,
    fences: bool,
) -> Option<BlockOpen> {
    if let Some(header) = CellHeader::scan(lines, at) {
        return Some(BlockOpen::CellHeader(header));
    }
    if !fences {
        return None;
    }
    let sig = lines.get(at)?.fence_sig.as_ref()?;
    let close = index.find_close(lines, at, sig)?;
    Some(BlockOpen::FencedCode {
        sig: sig.clone(),
        open: at,
        close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::classify::classify_all;
    use xi_rope::Rope;

    fn open_at(src: &str, at: usize, fences: bool) -> Option<BlockOpen> {
        let lines = classify_all(&Rope::from(src));
        try_open_block(&lines, &FenceIndex::new(&lines), at, fences)
    }

    #[test]
    fn header_opens_block() {
        assert!(matches!(
            open_at("---\ntype: quiz\n---\nQ?\n", 0, true),
            Some(BlockOpen::CellHeader(_))
        ));
    }

    #[test]
    fn closed_fence_opens_block() {
        match open_at("```py\nx = 1\n```\n", 0, true) {
            Some(BlockOpen::FencedCode { open, close, sig }) => {
                assert_eq!((open, close), (0, 2));
                assert_eq!(sig.language(), "py");
            }
            other => panic!("expected fence, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_fence_is_not_an_opener() {
        assert_eq!(open_at("```py\nx = 1\n", 0, true), None);
    }

    #[test]
    fn fences_ignored_when_disabled() {
        assert_eq!(open_at("```py\nx = 1\n```\n", 0, false), None);
    }

    #[test]
    fn untyped_delimiters_inside_fence_are_raw() {
        match open_at("```\n---\ntitle: x\n---\n```\n", 0, true) {
            Some(BlockOpen::FencedCode { close, .. }) => assert_eq!(close, 4),
            other => panic!("expected fence, got {other:?}"),
        }
    }

    #[test]
    fn fence_does_not_close_past_a_cell_header() {
        let src = "```js\nlet x\n---\ntype: code\n---\n```\nx\n```\n";
        assert_eq!(open_at(src, 0, true), None);
        assert!(matches!(
            open_at(src, 2, true),
            Some(BlockOpen::CellHeader(_))
        ));
    }

    #[test]
    fn later_opener_skips_earlier_closers() {
        let src = "```\na\n```\n\n````\nb\n```\n````\n";
        match open_at(src, 4, true) {
            Some(BlockOpen::FencedCode { open, close, .. }) => assert_eq!((open, close), (4, 7)),
            other => panic!("expected fence, got {other:?}"),
        }
    }

    #[test]
    fn index_marks_next_header_per_line() {
        let lines = classify_all(&Rope::from("a\n---\ntype: quiz\n---\nQ?\n"));
        let index = FenceIndex::new(&lines);
        assert_eq!(index.next_header, vec![1, 1, 5, 5, 5, 5]);
    }
}
