use crate::validation::FieldViolation;

/// Domain-level error type shared across crates.
///
/// The api crate maps each variant to an HTTP status in its `AppError`
/// implementation; nothing here knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist (or is soft-deleted).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// One or more request fields failed validation.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The request conflicts with existing data (e.g. duplicate name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything unexpected. The message is for logs, never for clients.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a not-found error on an integer-keyed catalog row.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
