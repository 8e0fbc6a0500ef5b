/// Which fence character opened a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// What a single line looks like if it is a fence opener or closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    /// Number of fence characters in the run (at least [`CodeFence::MIN_LEN`]).
    pub len: usize,
    /// Info string after the fence run, trimmed. Empty on closers.
    pub info: String,
}

impl FenceSig {
    /// First word of the info string: the declared language.
    pub fn language(&self) -> &str {
        self.info.split_whitespace().next().unwrap_or("")
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LEN: usize = 3;
    /// Fences may be indented by up to this many spaces.
    pub const MAX_INDENT: usize = 3;

    /// Recognises a fence line. `line` must not include its line terminator.
    ///
    /// Shorter runs (` `` `) are not fences and stay literal text.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let indent = line.bytes().take_while(|&b| b == b' ').count();
        if indent > Self::MAX_INDENT {
            return None;
        }
        let rest = &line[indent..];
        let first = *rest.as_bytes().first()?;
        let kind = match first {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let len = rest.bytes().take_while(|&b| b == first).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = rest[len..].trim();
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig {
            kind,
            len,
            info: info.to_string(),
        })
    }

    /// True when `candidate` closes a block opened by `open`: same fence
    /// character, a run at least as long, and no info string.
    pub fn closes(open: &FenceSig, candidate: Option<&FenceSig>) -> bool {
        matches!(
            candidate,
            Some(c) if c.kind == open.kind && c.len >= open.len && c.info.is_empty()
        )
    }
}
