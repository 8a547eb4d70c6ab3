use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store was unreachable or rejected the operation.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// A stored record could not be turned back into a domain value.
    #[error("Decode failed: {0}")]
    Decode(String),
}
