use thiserror::Error;

/// Failure raised by a persistence collaborator.
///
/// Find-one operations signal absence with `Ok(None)`, never with
/// `NotFound`; the or-fail lookups are the only ones that use it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Backend(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl StoreError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}
