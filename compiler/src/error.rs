use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("field {0:?} not found in destination structure")]
    FieldNotFound(String),

    #[error("{0} is nil")]
    NilInput(String),

    #[error("option {option:?} has wrong type, want {expected}")]
    MalformedOption {
        option:   String,
        expected: &'static str,
    },

    #[error("structure {0:?} not found")]
    StructureNotFound(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl TransformerError {
    /// Errors that abort only the message being processed. Everything else
    /// aborts the whole unit.
    pub fn is_message_local(&self) -> bool {
        matches!(
            self,
            TransformerError::FieldNotFound(_)
                | TransformerError::NilInput(_)
                | TransformerError::StructureNotFound(_)
        )
    }
}
