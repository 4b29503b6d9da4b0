use crate::DocId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the public engine API. Every failure is detected
/// before any state is mutated, so a failed call leaves the engine as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("ratings must not be empty (document {0})")]
    EmptyRatings(DocId),

    #[error("document {0} is already indexed")]
    DuplicateDocument(DocId),

    #[error("document {0} not found")]
    DocumentNotFound(DocId),

    #[error("invalid query term {0:?}")]
    InvalidQueryTerm(String),
}
