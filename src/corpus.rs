use std::{fmt, fs, io::Read, ops::Deref, path::Path};

use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

/// One candidate response.
/// Stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence(Box<str>);

impl Sentence {
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        Sentence(text.as_ref().trim().to_lowercase().into_boxed_str())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Sentence {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sentence {
    fn from(text: &str) -> Self {
        Sentence::new(text)
    }
}

impl PartialEq<&str> for Sentence {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Split corpus text into sentences.
/// Boundaries are found on the original casing, then every sentence is
/// stored lowercased and trimmed. Empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Sentence::new)
        .collect()
}

/// Ordered pool of candidate sentences.
/// Position is identity: matrix row `i` is sentence `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sentences<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Sentence>,
    {
        Self {
            sentences: sentences.into_iter().map(Into::into).collect(),
        }
    }

    /// Split raw text into sentences
    pub fn from_text(text: &str) -> Self {
        Self {
            sentences: split_sentences(text),
        }
    }

    /// Read everything from `reader`. Invalid UTF-8 is decoded lossily.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    /// Load a corpus file. Invalid UTF-8 is decoded lossily.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::CorpusUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_text(&String::from_utf8_lossy(&bytes));
        info!(path = %path.display(), bytes = bytes.len(), sentences = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter()
    }

    /// Append `query` as the last sentence, run `f` on the extended pool,
    /// then drop exactly that appended entry again.
    ///
    /// Removal is positional, so a query equal to an existing sentence never
    /// removes the earlier one. The pool is restored even if `f` unwinds.
    pub fn with_query<R, F>(&mut self, query: Sentence, f: F) -> R
    where
        F: FnOnce(&[Sentence]) -> R,
    {
        let guard = TransientQuery::push(&mut self.sentences, query);
        f(guard.snapshot())
    }
}

/// Truncates the pool back to its original length on drop
struct TransientQuery<'a> {
    sentences: &'a mut Vec<Sentence>,
    restore_len: usize,
}

impl<'a> TransientQuery<'a> {
    fn push(sentences: &'a mut Vec<Sentence>, query: Sentence) -> Self {
        let restore_len = sentences.len();
        sentences.push(query);
        Self {
            sentences,
            restore_len,
        }
    }

    fn snapshot(&self) -> &[Sentence] {
        self.sentences.as_slice()
    }
}

impl Drop for TransientQuery<'_> {
    fn drop(&mut self) {
        self.sentences.truncate(self.restore_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn sentence_is_normalized() {
        let s = Sentence::new("  Great Sound  ");
        assert_eq!(s, "great sound");
        assert_eq!(s.to_string(), "great sound");
    }

    #[test]
    fn split_sentences_lowercases_and_drops_empty() {
        let sentences = split_sentences("Great amp. Shipping was slow!\n\nWould buy again?  ");
        let sentences: Vec<&str> = sentences.iter().map(|s| s.as_str()).collect();
        assert_eq!(sentences, vec!["great amp.", "shipping was slow!", "would buy again?"]);
    }

    #[test]
    fn with_query_appends_last_and_restores() {
        let mut corpus = Corpus::from_sentences(["a b", "c d"]);
        let before = corpus.clone();
        let seen = corpus.with_query(Sentence::new("e f"), |pool| {
            assert_eq!(pool.len(), 3);
            pool.last().cloned()
        });
        assert_eq!(seen, Some(Sentence::new("e f")));
        assert_eq!(corpus, before);
    }

    #[test]
    fn with_query_removes_only_the_appended_duplicate() {
        let mut corpus = Corpus::from_sentences(["same", "other"]);
        corpus.with_query(Sentence::new("same"), |pool| {
            assert_eq!(pool[0], pool[2]);
        });
        assert_eq!(corpus.as_slice(), &[Sentence::new("same"), Sentence::new("other")]);
    }

    #[test]
    fn with_query_restores_on_panic() {
        let mut corpus = Corpus::from_sentences(["one"]);
        let result = catch_unwind(AssertUnwindSafe(|| {
            corpus.with_query(Sentence::new("two"), |_| {
                panic!("boom");
            })
        }));
        assert!(result.is_err());
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn load_missing_file_is_startup_error() {
        let err = Corpus::load("/no/such/corpus.txt").unwrap_err();
        assert!(matches!(err, Error::CorpusUnavailable { .. }));
    }

    #[test]
    fn from_reader_decodes_lossily() {
        let bytes: &[u8] = b"Nice amp \xff here. Loud too.";
        let corpus = Corpus::from_reader(bytes).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.get(0).is_some_and(|s| s.starts_with("nice amp")));
        assert_eq!(corpus.get(1).map(Sentence::as_str), Some("loud too."));
    }
}
