use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersonalFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PersonalFinanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PersonalFinanceError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        PersonalFinanceError::Overflow {
            context: context.into(),
        }
    }

    /// The offending parameter, when the error is an input violation.
    pub fn field(&self) -> Option<&str> {
        match self {
            PersonalFinanceError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PersonalFinanceError {
    fn from(e: serde_json::Error) -> Self {
        PersonalFinanceError::SerializationError(e.to_string())
    }
}
