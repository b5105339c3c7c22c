/// This crate is a closed-corpus retrieval chatbot built on a TF-IDF vectorizer.
pub mod analyzer;
pub mod config;
pub mod console;
pub mod corpus;
pub mod error;
pub mod matcher;
pub mod session;
pub mod utils;
pub mod vectorizer;

/// Session
/// One conversation over an owned corpus.
/// Each utterance becomes one `Reply`:
/// - farewell / thanks inputs close the session
/// - greeting keywords get a canned greeting picked by a `ResponseChooser`
/// - anything else is answered with the most similar corpus sentence,
///   or the fallback message when nothing shares a weighted term
///
/// The query is appended to the corpus for exactly one turn and removed again
/// by position, so the corpus is the same before and after every turn.
pub use session::{Reply, Session, SessionState};

/// Response Choosers
/// Strategy for picking one greeting out of several.
/// - `RandomChooser`: uniform, seeded from the OS
/// - `SeededChooser`: uniform, reproducible from a `u64`
/// - `FirstChooser`: always the first one
pub use session::{FirstChooser, RandomChooser, ResponseChooser, SeededChooser};

/// TF-IDF Vectorizer
/// Turns an ordered list of sentences into a weighted term matrix.
/// Nothing is cached: the vocabulary, document frequencies and idf are
/// recomputed on every `fit_transform`.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32` or `f64`)
/// - `E`: TF-IDF calculation engine (e.g. `DefaultTFIDFEngine`)
pub use vectorizer::{TFIDFMatrix, TFIDFVectorizer};

/// TF IDF Calculation Engine Trait
/// Defines how idf and document rows are computed.
/// `DefaultTFIDFEngine` uses raw counts, smoothed idf
/// `ln((1 + n) / (1 + df)) + 1` and L2 normalized rows.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Text normalization
/// `Analyzer` lowercases, strips punctuation, splits words and lemmatizes.
/// The lemmatizer is pluggable through the `Lemmatizer` trait.
pub use analyzer::{Analyzer, IdentityLemmatizer, Lemmatizer, NounLemmatizer};

/// Corpus
/// Ordered pool of lowercased candidate sentences.
pub use corpus::{split_sentences, Corpus, Sentence};

/// Matching
/// Cosine ranking of a query row against every other row.
pub use matcher::{best_match, cosine_scores, Match};

pub use config::ChatConfig;
pub use console::Console;
pub use error::{Error, Result};
