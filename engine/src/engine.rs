use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, Result};
use crate::query::{parse_query, Query};
use crate::tokenizer::{split_into_words, StopWords};
use crate::{DocId, DocMeta, DocumentStatus, SearchHit};

/// Default cap on the number of hits returned per query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Two relevance scores closer than this rank by rating instead. The
/// tolerance is part of the observable ordering contract; do not replace it
/// with exact equality.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Document selection applied during ranking, resolved at runtime.
pub enum Filter {
    /// Only documents with status `Actual`.
    Default,
    /// Only documents with exactly this status.
    Status(DocumentStatus),
    /// Arbitrary predicate over id, status, and rating.
    Predicate(Box<dyn Fn(DocId, DocumentStatus, i32) -> bool>),
}

impl Filter {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    fn accepts(&self, doc_id: DocId, status: DocumentStatus, rating: i32) -> bool {
        match self {
            Filter::Default => status == DocumentStatus::Actual,
            Filter::Status(wanted) => status == *wanted,
            Filter::Predicate(pred) => pred(doc_id, status, rating),
        }
    }
}

/// In-memory TF-IDF search engine.
///
/// Owns its stop words, inverted index, and document store exclusively; two
/// engines never share state. All operations are synchronous, and a failed
/// call never leaves partial mutations behind.
pub struct SearchEngine {
    stop_words: StopWords,
    index: HashMap<String, HashMap<DocId, f64>>,
    documents: BTreeMap<DocId, DocMeta>,
    max_results: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_max_results(MAX_RESULT_DOCUMENT_COUNT)
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine returning at most `max_results` hits per query.
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            stop_words: StopWords::new(),
            index: HashMap::new(),
            documents: BTreeMap::new(),
            max_results,
        }
    }

    /// Add every word of `text` to the stop-word set. Applies only to
    /// documents and queries processed after this call.
    pub fn set_stop_words(&mut self, text: &str) {
        self.stop_words.add_words(text);
    }

    /// Index a document under an externally assigned id.
    ///
    /// Fails with [`EngineError::EmptyRatings`] if `ratings` is empty and
    /// with [`EngineError::DuplicateDocument`] if the id is already taken;
    /// both checks run before any mutation.
    pub fn add_document(
        &mut self,
        doc_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if ratings.is_empty() {
            return Err(EngineError::EmptyRatings(doc_id));
        }
        if self.documents.contains_key(&doc_id) {
            return Err(EngineError::DuplicateDocument(doc_id));
        }

        let words = self.split_into_words_no_stop(text);
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *self
                .index
                .entry(word)
                .or_default()
                .entry(doc_id)
                .or_insert(0.0) += inv_word_count;
        }
        let meta = DocMeta {
            rating: average_rating(ratings),
            status,
        };
        self.documents.insert(doc_id, meta);
        tracing::debug!(doc_id, status = ?status, "document indexed");
        Ok(())
    }

    /// Number of distinct document ids successfully added.
    pub fn get_document_count(&self) -> usize {
        self.documents.len()
    }

    /// Rank documents for `raw_query` with the default filter
    /// (status == `Actual`).
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.find_top_documents_with(raw_query, Filter::Default)
    }

    /// Rank documents for `raw_query`, keeping only those the filter accepts.
    ///
    /// Hits are sorted by relevance descending; scores within
    /// [`RELEVANCE_EPSILON`] of each other rank by rating descending. At most
    /// the configured maximum number of hits is returned.
    pub fn find_top_documents_with(&self, raw_query: &str, filter: Filter) -> Result<Vec<SearchHit>> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut hits = self.find_all_documents(&query, &filter);
        hits.sort_by(|lhs, rhs| {
            if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
                rhs.rating.cmp(&lhs.rating)
            } else {
                rhs.relevance
                    .partial_cmp(&lhs.relevance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }
        });
        hits.truncate(self.max_results);
        tracing::debug!(query = raw_query, hits = hits.len(), "query ranked");
        Ok(hits)
    }

    /// Report which plus terms of `raw_query` occur in document `doc_id`,
    /// in lexicographic order, along with the document's status.
    ///
    /// A minus term occurring in the document empties the match list; that is
    /// a disqualification, not an error. Fails with
    /// [`EngineError::DocumentNotFound`] for an unknown id.
    pub fn match_document(
        &self,
        raw_query: &str,
        doc_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let meta = self
            .documents
            .get(&doc_id)
            .ok_or(EngineError::DocumentNotFound(doc_id))?;
        let query = parse_query(raw_query, &self.stop_words)?;

        let mut matched_words = Vec::new();
        for word in &query.plus_words {
            if let Some(postings) = self.index.get(word) {
                if postings.contains_key(&doc_id) {
                    matched_words.push(word.clone());
                }
            }
        }
        for word in &query.minus_words {
            if let Some(postings) = self.index.get(word) {
                if postings.contains_key(&doc_id) {
                    matched_words.clear();
                    break;
                }
            }
        }
        Ok((matched_words, meta.status))
    }

    fn split_into_words_no_stop(&self, text: &str) -> Vec<String> {
        split_into_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }

    // Only called for terms present in the index, so postings is non-empty.
    fn inverse_document_freq(&self, postings: &HashMap<DocId, f64>) -> f64 {
        (self.get_document_count() as f64 / postings.len() as f64).ln()
    }

    fn find_all_documents(&self, query: &Query, filter: &Filter) -> Vec<SearchHit> {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let postings = match self.index.get(word) {
                Some(postings) => postings,
                None => continue,
            };
            let idf = self.inverse_document_freq(postings);
            for (&doc_id, &term_freq) in postings {
                if let Some(meta) = self.documents.get(&doc_id) {
                    if filter.accepts(doc_id, meta.status, meta.rating) {
                        *document_to_relevance.entry(doc_id).or_insert(0.0) += term_freq * idf;
                    }
                }
            }
        }

        // Minus terms exclude unconditionally, regardless of the filter.
        for word in &query.minus_words {
            if let Some(postings) = self.index.get(word) {
                for doc_id in postings.keys() {
                    document_to_relevance.remove(doc_id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                self.documents.get(&doc_id).map(|meta| SearchHit {
                    doc_id,
                    relevance,
                    rating: meta.rating,
                })
            })
            .collect()
    }
}

/// Truncating integer mean, matching the store's rating semantics.
fn average_rating(ratings: &[i32]) -> i32 {
    let sum: i32 = ratings.iter().sum();
    sum / ratings.len() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(average_rating(&[1, 2, 3]), 2);
        assert_eq!(average_rating(&[1, 2]), 1);
        assert_eq!(average_rating(&[-1, -2]), -1);
    }

    #[test]
    fn filter_variants_resolve() {
        let by_status = Filter::Status(DocumentStatus::Banned);
        assert!(by_status.accepts(1, DocumentStatus::Banned, 0));
        assert!(!by_status.accepts(1, DocumentStatus::Actual, 0));

        let default = Filter::Default;
        assert!(default.accepts(1, DocumentStatus::Actual, 0));
        assert!(!default.accepts(1, DocumentStatus::Removed, 0));

        let by_id = Filter::predicate(|doc_id, _, _| doc_id == 7);
        assert!(by_id.accepts(7, DocumentStatus::Removed, 0));
        assert!(!by_id.accepts(8, DocumentStatus::Actual, 0));
    }
}
