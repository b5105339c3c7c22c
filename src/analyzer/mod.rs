pub mod lemma;

use std::{collections::HashSet, fmt, sync::Arc};

use ahash::RandomState;
use unicode_segmentation::UnicodeSegmentation;

pub use lemma::{IdentityLemmatizer, Lemmatizer, NounLemmatizer};

/// The 32 ASCII punctuation characters
pub const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Text normalizer
/// Turns raw text into the token sequence the vectorizer counts:
/// 1. lowercase
/// 2. remove punctuation (removed, not replaced by a space)
/// 3. split on Unicode word boundaries
/// 4. lemmatize every word
///
/// Order and duplicates are kept.
#[derive(Clone)]
pub struct Analyzer {
    punctuation: HashSet<char, RandomState>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("punctuation", &self.punctuation.len())
            .finish_non_exhaustive()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(NounLemmatizer::new()))
    }
}

impl Analyzer {
    /// Analyzer with ASCII punctuation and the given lemmatizer
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self {
            punctuation: ASCII_PUNCTUATION.chars().collect(),
            lemmatizer,
        }
    }

    /// Replace the punctuation set
    pub fn with_punctuation(mut self, chars: &str) -> Self {
        self.punctuation = chars.chars().collect();
        self
    }

    #[inline]
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    /// Lowercased, punctuation-stripped words of `text`, before lemmatization
    pub fn words(&self, text: &str) -> Vec<String> {
        let stripped: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !self.is_punctuation(*c))
            .collect();
        stripped.unicode_words().map(str::to_string).collect()
    }

    #[inline]
    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatizer.lemmatize(word)
    }

    /// Normalize `text` into tokens
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.words(text)
            .iter()
            .map(|word| self.lemmatize(word))
            .collect()
    }
}
