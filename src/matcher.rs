use num::Num;
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    utils::sort::rank_by_score_desc,
    vectorizer::TFIDFMatrix,
};

/// Outcome of a match attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Match {
    /// Best non-self row and its cosine similarity to the query
    Found { row: usize, score: f64 },
    /// No row shares a weighted term with the query
    NoMatch,
}

/// Cosine similarity of `query_row` with every row (itself included)
pub fn cosine_scores<N>(matrix: &TFIDFMatrix<N>, query_row: usize) -> Result<Vec<f64>>
where
    N: Num + Copy + Into<f64> + Send + Sync,
{
    let query = matrix.row(query_row).ok_or(Error::RowOutOfRange {
        row: query_row,
        rows: matrix.n_rows(),
    })?;
    Ok(matrix
        .rows()
        .par_iter()
        .map(|row| query.cosine_similarity(row))
        .collect())
}

/// Best match for `query_row`.
///
/// Rows are ranked with the query itself first, then by score descending,
/// then by row index ascending; the second ranked row is the answer. A
/// duplicate of the query is therefore returned instead of the query, and the
/// lowest index wins among equally scored rows.
///
/// A best score of exactly 0, or no other row at all, is `Match::NoMatch`.
pub fn best_match<N>(matrix: &TFIDFMatrix<N>, query_row: usize) -> Result<Match>
where
    N: Num + Copy + Into<f64> + Send + Sync,
{
    let scores = cosine_scores(matrix, query_row)?;
    let ranked = rank_by_score_desc(&scores, Some(query_row));
    let Some(&row) = ranked.get(1) else {
        return Ok(Match::NoMatch);
    };
    let score = scores[row];
    if score == 0.0 {
        return Ok(Match::NoMatch);
    }
    Ok(Match::Found { row, score })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        analyzer::{Analyzer, IdentityLemmatizer},
        vectorizer::TFIDFVectorizer,
    };

    fn fit(docs: &[&str]) -> TFIDFMatrix<f64> {
        TFIDFVectorizer::<f64>::new(Analyzer::new(Arc::new(IdentityLemmatizer))).fit_transform(docs)
    }

    #[test]
    fn self_similarity_is_one() {
        let m = fit(&["great amp", "loud cable", "great"]);
        let scores = cosine_scores(&m, 2).unwrap();
        assert!((scores[2] - 1.0).abs() < 1e-9);
        assert!(scores.iter().all(|s| (0.0..=1.0 + 1e-12).contains(s)));
    }

    #[test]
    fn picks_best_non_self_row() {
        let m = fit(&["the product is great", "shipping was slow", "great sound quality", "great"]);
        match best_match(&m, 3).unwrap() {
            Match::Found { row, score } => {
                assert_eq!(row, 0);
                assert!(score > 0.0 && score < 1.0);
            }
            Match::NoMatch => panic!("expected a match"),
        }
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let m = fit(&["cheap amp", "loud", "cheap amp", "amp cheap"]);
        assert!(matches!(best_match(&m, 3).unwrap(), Match::Found { row: 0, .. }));
    }

    #[test]
    fn duplicate_of_query_is_returned_not_the_query() {
        let m = fit(&["loud", "great amp", "great amp"]);
        assert!(matches!(best_match(&m, 2).unwrap(), Match::Found { row: 1, .. }));
    }

    #[test]
    fn no_overlap_is_no_match() {
        let m = fit(&["hello there", "xyzabc"]);
        assert_eq!(best_match(&m, 1).unwrap(), Match::NoMatch);
    }

    #[test]
    fn zero_query_vector_is_no_match() {
        let m = fit(&["great amp", "the and of"]);
        assert_eq!(best_match(&m, 1).unwrap(), Match::NoMatch);
    }

    #[test]
    fn single_row_is_no_match() {
        let m = fit(&["great amp"]);
        assert_eq!(best_match(&m, 0).unwrap(), Match::NoMatch);
    }

    #[test]
    fn out_of_range_row_is_error() {
        let m = fit(&["great amp"]);
        assert!(matches!(
            best_match(&m, 5),
            Err(Error::RowOutOfRange { row: 5, rows: 1 })
        ));
    }
}
