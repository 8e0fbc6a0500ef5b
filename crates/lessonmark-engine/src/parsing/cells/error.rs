use thiserror::Error;

/// Why a raw block could not be built into its declared cell type.
///
/// Never surfaced to callers: the cell builder turns every error into an
/// unknown cell carrying the block's raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("unrecognized cell type `{0}`")]
    UnrecognizedType(String),

    #[error("quiz has no question line")]
    MissingQuestion,

    #[error("quiz has no options")]
    NoOptions,

    #[error("quiz option on line {line} has no text")]
    EmptyOption { line: usize },

    #[error("unexpected line {line} in quiz: {text}")]
    UnexpectedLine { line: usize, text: String },

    #[error("quiz has no answer marker")]
    MissingAnswer,

    #[error("second answer marker on line {line}")]
    DuplicateAnswer { line: usize },

    #[error("more than one option is checked")]
    MultipleChecked,

    #[error("answer `{0}` does not match any option")]
    UnresolvedAnswer(String),

    #[error("answer markers disagree: option {first} vs option {second}")]
    ConflictingAnswers { first: usize, second: usize },
}
