use num::Num;

use crate::{
    utils::math::vector::ZeroSpVec,
    vectorizer::{doc_freq::DocumentFrequency, term::TermFrequency, Vocabulary},
};

pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// IDFベクトルを生成する
    /// # Arguments
    /// * `doc_freq` - document frequencies of this fit
    /// * `vocabulary` - column order
    /// # Returns
    /// * `Vec<f64>` - one idf per column
    fn idf_vec(doc_freq: &DocumentFrequency, vocabulary: &Vocabulary) -> Vec<f64>;

    /// One weighted document row
    /// # Arguments
    /// * `freq` - term counts of the document
    /// * `vocabulary` - column order
    /// * `idf` - output of `idf_vec`
    fn tf_idf_vec(freq: &TermFrequency, vocabulary: &Vocabulary, idf: &[f64]) -> ZeroSpVec<N>;
}

/// デフォルトのTF-IDFエンジン
/// - tf: raw count
/// - idf: `ln((1 + n) / (1 + df)) + 1`
/// - rows are L2 normalized
///
/// `f32` and `f64` are supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// Smoothed idf, never zero, so a term present everywhere still counts
    #[inline]
    pub fn smoothed_idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    fn idf(doc_freq: &DocumentFrequency, vocabulary: &Vocabulary) -> Vec<f64> {
        let doc_num = doc_freq.get_doc_num();
        vocabulary
            .iter()
            .map(|term| Self::smoothed_idf(doc_num, doc_freq.get_term_count(term)))
            .collect()
    }

    /// `(column, weight)` pairs with unit L2 norm, empty for a zero row
    fn weights(freq: &TermFrequency, vocabulary: &Vocabulary, idf: &[f64]) -> Vec<(u32, f64)> {
        let mut weights: Vec<(u32, f64)> = freq
            .iter()
            .filter_map(|(term, count)| {
                let col = vocabulary.get_index_of(term)?;
                let w = count as f64 * idf.get(col).copied().unwrap_or(0.0);
                Some((col as u32, w))
            })
            .collect();
        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            weights.iter_mut().for_each(|(_, w)| *w /= norm);
        } else {
            weights.clear();
        }
        weights
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(doc_freq: &DocumentFrequency, vocabulary: &Vocabulary) -> Vec<f64> {
        Self::idf(doc_freq, vocabulary)
    }

    fn tf_idf_vec(freq: &TermFrequency, vocabulary: &Vocabulary, idf: &[f64]) -> ZeroSpVec<f64> {
        ZeroSpVec::from_pairs(vocabulary.len(), Self::weights(freq, vocabulary, idf))
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(doc_freq: &DocumentFrequency, vocabulary: &Vocabulary) -> Vec<f64> {
        Self::idf(doc_freq, vocabulary)
    }

    fn tf_idf_vec(freq: &TermFrequency, vocabulary: &Vocabulary, idf: &[f64]) -> ZeroSpVec<f32> {
        let pairs = Self::weights(freq, vocabulary, idf)
            .into_iter()
            .map(|(col, w)| (col, w as f32))
            .collect();
        ZeroSpVec::from_pairs(vocabulary.len(), pairs)
    }
}
