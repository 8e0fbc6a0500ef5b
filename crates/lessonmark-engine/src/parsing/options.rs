/// The typed cell a declared type name maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Text,
    Code,
    Quiz,
}

/// Parser configuration, passed explicitly into every parse.
///
/// Type names are matched case-insensitively against the trimmed declared
/// type of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Header types that produce text cells.
    pub text_types: Vec<String>,
    /// Header types that produce code cells.
    pub code_types: Vec<String>,
    /// Header types and fence languages that produce quiz cells.
    pub quiz_types: Vec<String>,
    /// Whether fenced blocks outside declared cells become cells of their own.
    pub fenced_cells: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            text_types: vec!["text".to_string(), "markdown".to_string()],
            code_types: vec!["code".to_string()],
            quiz_types: vec!["quiz".to_string()],
            fenced_cells: true,
        }
    }
}

impl ParseOptions {
    /// Maps a declared type to a cell type, `None` when unrecognised.
    pub fn cell_type(&self, declared: &str) -> Option<CellType> {
        let declared = declared.trim();
        let known = |names: &[String]| names.iter().any(|n| n.trim().eq_ignore_ascii_case(declared));

        if declared.is_empty() {
            None
        } else if known(&self.text_types) {
            Some(CellType::Text)
        } else if known(&self.code_types) {
            Some(CellType::Code)
        } else if known(&self.quiz_types) {
            Some(CellType::Quiz)
        } else {
            None
        }
    }

    pub fn is_quiz_type(&self, declared: &str) -> bool {
        self.cell_type(declared) == Some(CellType::Quiz)
    }
}
