use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheatnoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Note not found: {0}")]
    NoteNotFound(u32),

    #[error("Maximum number of notes reached ({0})")]
    CapacityExhausted(usize),

    #[error("Failed to resize database: {0}")]
    Allocation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error on line {line}: {reason}")]
    Csv { line: usize, reason: String },
}

impl CheatnoteError {
    /// Whether the error means the operation (and the process) cannot go on.
    ///
    /// Validation and lookup failures are recoverable; resource and I/O
    /// failures are not, because the store has no rollback.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CheatnoteError::InvalidInput(_)
                | CheatnoteError::NoteNotFound(_)
                | CheatnoteError::Csv { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CheatnoteError>;
