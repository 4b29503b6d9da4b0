use std::collections::HashSet;

/// Split text on single space characters.
///
/// Consecutive, leading, and trailing delimiters all yield empty tokens, and
/// the empty string yields one empty token. No trimming, collapsing, or case
/// folding happens here: query/index equivalence depends on both sides seeing
/// byte-identical words.
pub fn split_into_words(text: &str) -> Vec<String> {
    text.split(' ').map(str::to_string).collect()
}

/// Words excluded from indexing and query interpretation.
///
/// Insertion-only and scoped to one engine instance. Adding words affects
/// only documents and queries processed afterwards; nothing already indexed
/// is re-filtered.
#[derive(Debug, Default, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `text` and insert every resulting word (set semantics).
    pub fn add_words(&mut self, text: &str) {
        for word in split_into_words(text) {
            self.words.insert(word);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
