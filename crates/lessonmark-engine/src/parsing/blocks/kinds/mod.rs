pub mod cell_header;
pub mod code_fence;

pub use cell_header::{CellHeader, HeaderEntry, HeaderMatch};
pub use code_fence::{CodeFence, FenceKind, FenceSig};
