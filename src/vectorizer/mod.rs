pub mod doc_freq;
pub mod stop_words;
pub mod term;
pub mod tfidf;

use std::{collections::HashSet, marker::PhantomData, time::Instant};

use ahash::RandomState;
use indexmap::IndexSet;
use num::Num;
use rayon::prelude::*;
use tracing::debug;

use crate::{
    analyzer::Analyzer,
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        doc_freq::DocumentFrequency,
        stop_words::ENGLISH_STOP_WORDS,
        term::TermFrequency,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    },
};

/// Column order of a fitted matrix
pub type Vocabulary = IndexSet<Box<str>>;

/// TF-IDF Vectorizer
/// Builds a weighted term space over an ordered document collection.
///
/// Nothing is cached between calls: every `fit_transform` recomputes the
/// vocabulary, the document frequencies and the idf from the documents it is
/// given, because the collection changes between calls.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: stored weight type (`f32` or `f64`)
/// - `E`: TF-IDF calculation engine (e.g. `DefaultTFIDFEngine`)
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Num + Copy + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    analyzer: Analyzer,
    stop_words: HashSet<Box<str>, RandomState>,
    _marker: PhantomData<fn() -> (N, E)>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Num + Copy + Into<f64> + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Vectorizer with the English stop words
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            stop_words: ENGLISH_STOP_WORDS.iter().map(|w| Box::from(*w)).collect(),
            _marker: PhantomData,
        }
    }

    /// Replace the stop word set
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words.into_iter().map(|w| Box::from(w.as_ref())).collect();
        self
    }

    /// Add words to the stop word set
    pub fn extend_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| Box::from(w.as_ref())));
        self
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    #[inline]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Normalize `text` and count the tokens that are not stop words.
    /// A word is dropped when either its surface form or its lemma is a stop
    /// word, so heuristic lemmas such as `always` -> `alway` stay out.
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        for word in self.analyzer.words(text) {
            if self.is_stop_word(&word) {
                continue;
            }
            let lemma = self.analyzer.lemmatize(&word);
            if !self.is_stop_word(&lemma) {
                freq.add_term(&lemma);
            }
        }
        freq
    }

    /// Fit the vocabulary on `documents` and return their weighted rows.
    /// Row `i` of the result belongs to `documents[i]`.
    pub fn fit_transform<S>(&self, documents: &[S]) -> TFIDFMatrix<N>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let freqs: Vec<TermFrequency> = documents
            .par_iter()
            .map(|doc| self.term_frequency(doc.as_ref()))
            .collect();

        let mut doc_freq = DocumentFrequency::new();
        for freq in &freqs {
            doc_freq.add_set(freq.term_set_iter());
        }
        // 列は辞書順で固定
        let mut vocabulary: Vocabulary = doc_freq.terms().map(Box::from).collect();
        vocabulary.sort();

        let idf = E::idf_vec(&doc_freq, &vocabulary);
        let rows: Vec<ZeroSpVec<N>> = freqs
            .par_iter()
            .map(|freq| E::tf_idf_vec(freq, &vocabulary, &idf))
            .collect();

        debug!(
            docs = rows.len(),
            vocab = vocabulary.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "fit_transform"
        );
        TFIDFMatrix {
            vocabulary,
            idf,
            rows,
        }
    }
}

/// Result of one fit: a `documents × vocabulary` matrix of non-negative
/// weights, every non-zero row with unit L2 norm.
#[derive(Debug, Clone)]
pub struct TFIDFMatrix<N>
where
    N: Num + Copy,
{
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    rows: Vec<ZeroSpVec<N>>,
}

impl<N> TFIDFMatrix<N>
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn rows(&self) -> &[ZeroSpVec<N>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ZeroSpVec<N>> {
        self.rows.get(index)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// idf of `term`, `None` if it is not in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        let col = self.vocabulary.get_index_of(term)?;
        self.idf.get(col).copied()
    }

    /// Weight of `term` in row `row`.
    /// `None` if the row or the term does not exist, `Some(0.0)` if the
    /// document simply does not contain the term.
    pub fn weight(&self, row: usize, term: &str) -> Option<f64> {
        let col = self.vocabulary.get_index_of(term)?;
        let row = self.rows.get(row)?;
        Some(row.get(col).map_or(0.0, |v| (*v).into()))
    }
}
