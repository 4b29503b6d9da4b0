pub mod engine;
pub mod error;
pub mod query;
pub mod tokenizer;

pub use engine::{Filter, SearchEngine, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use error::{EngineError, Result};

use serde::{Deserialize, Serialize};

pub type DocId = u32;

/// Lifecycle state a document is tagged with at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// One ranked search result. Recomputed per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

/// Per-document metadata kept in the store: the truncated mean of the
/// ratings given at ingestion, plus the lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    pub rating: i32,
    pub status: DocumentStatus,
}
