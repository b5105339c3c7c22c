use std::collections::HashMap;

use ahash::RandomState;

/// Raw term counts of one document, after stop word removal.
///
/// # Examples
/// ```
/// use chatterbox::vectorizer::term::TermFrequency;
/// let freq: TermFrequency = ["cable", "amp", "cable"].into_iter().collect();
///
/// assert_eq!(freq.term_count("cable"), 2);
/// assert_eq!(freq.term_sum(), 3);
/// assert_eq!(freq.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TermFrequency {
    counts: HashMap<Box<str>, u64, RandomState>,
    total: u64,
}

impl TermFrequency {
    pub fn new() -> Self {
        Self {
            counts: HashMap::with_hasher(RandomState::new()),
            total: 0,
        }
    }

    /// Count one more occurrence of `term`
    #[inline]
    pub fn add_term(&mut self, term: &str) {
        match self.counts.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(Box::from(term), 1);
            }
        }
        self.total += 1;
    }

    /// `(term, count)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(term, &count)| (&**term, count))
    }

    /// Distinct terms, each once
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|term| &**term)
    }

    /// Total number of counted occurrences
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TermFrequency {
    fn from_iter<I: IntoIterator<Item = S>>(terms: I) -> Self {
        let mut freq = Self::new();
        for term in terms {
            freq.add_term(term.as_ref());
        }
        freq
    }
}

impl<S: AsRef<str>> From<&[S]> for TermFrequency {
    fn from(terms: &[S]) -> Self {
        terms.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_occurrences() {
        let freq = TermFrequency::from(&["great", "amp", "great"][..]);
        assert_eq!(freq.term_count("great"), 2);
        assert_eq!(freq.term_count("missing"), 0);
        assert_eq!(freq.term_sum(), 3);

        let mut terms: Vec<&str> = freq.term_set_iter().collect();
        terms.sort_unstable();
        assert_eq!(terms, vec!["amp", "great"]);
    }

    #[test]
    fn empty() {
        let freq = TermFrequency::new();
        assert!(freq.is_empty());
        assert_eq!(freq.iter().count(), 0);
    }
}
