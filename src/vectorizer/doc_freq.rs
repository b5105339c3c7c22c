use std::collections::HashMap;

use ahash::RandomState;

/// Document count and per-term document frequency for one fit.
/// Holds no document text, only the statistics the IDF needs.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequency {
    /// number of documents added
    doc_num: u64,
    /// term -> number of documents containing it
    term_counts: HashMap<Box<str>, u64, RandomState>,
}

impl DocumentFrequency {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Add one document's distinct terms.
    /// The caller passes each term once per document.
    pub fn add_set<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self.term_counts.entry(Box::from(term)).or_insert(0) += 1;
        }
    }

    /// Number of documents
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Iterate over all distinct terms (unordered)
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.term_counts.keys().map(|k| &**k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let mut df = DocumentFrequency::new();
        df.add_set(["great", "amp"]);
        df.add_set(["great"]);
        df.add_set(std::iter::empty());
        assert_eq!(df.get_doc_num(), 3);
        assert_eq!(df.get_term_count("great"), 2);
        assert_eq!(df.get_term_count("amp"), 1);
        assert_eq!(df.get_term_count("cable"), 0);
        assert_eq!(df.vocab_size(), 2);
    }
}
