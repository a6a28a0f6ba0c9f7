use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Unknown loan category: '{0}' (expected personal, business or emergency)")]
    UnknownCategory(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LendingError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LendingError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LendingError {
    fn from(e: serde_json::Error) -> Self {
        LendingError::SerializationError(e.to_string())
    }
}
