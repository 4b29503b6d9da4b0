use std::collections::BTreeSet;

use crate::error::{EngineError, Result};
use crate::tokenizer::{split_into_words, StopWords};

/// A parsed free-text query: plus terms must be present in a document,
/// minus terms must be absent. Both sets are built after stop-word removal,
/// so a stop word never appears in either.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

/// Parse raw query text against the given stop-word set.
///
/// A leading `-` marks a minus term and is stripped; a bare minus sign is
/// rejected. Duplicates collapse via set semantics.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        if let Some(stripped) = word.strip_prefix('-') {
            if stripped.is_empty() {
                return Err(EngineError::InvalidQueryTerm(word));
            }
            if !stop_words.contains(stripped) {
                query.minus_words.insert(stripped.to_string());
            }
        } else if !stop_words.contains(&word) {
            query.plus_words.insert(word);
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(text: &str) -> StopWords {
        let mut stop = StopWords::new();
        stop.add_words(text);
        stop
    }

    #[test]
    fn separates_plus_and_minus_terms() {
        let query = parse_query("cat -city dog", &StopWords::new()).unwrap();
        assert_eq!(query.plus_words.iter().collect::<Vec<_>>(), ["cat", "dog"]);
        assert_eq!(query.minus_words.iter().collect::<Vec<_>>(), ["city"]);
    }

    #[test]
    fn drops_stop_words_from_both_sets() {
        let query = parse_query("cat in -the", &stop("in the")).unwrap();
        assert_eq!(query.plus_words.iter().collect::<Vec<_>>(), ["cat"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn collapses_duplicate_terms() {
        let query = parse_query("cat cat -city -city", &StopWords::new()).unwrap();
        assert_eq!(query.plus_words.len(), 1);
        assert_eq!(query.minus_words.len(), 1);
    }

    #[test]
    fn rejects_bare_minus() {
        let err = parse_query("cat -", &StopWords::new()).unwrap_err();
        assert_eq!(err, EngineError::InvalidQueryTerm("-".to_string()));
    }

    #[test]
    fn strips_exactly_one_minus_sign() {
        let query = parse_query("--cat", &StopWords::new()).unwrap();
        assert_eq!(query.minus_words.iter().collect::<Vec<_>>(), ["-cat"]);
    }
}
