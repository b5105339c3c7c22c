/// Rank row indices by score.
/// - `pinned` row (if any and in range) always ranks first
/// - then score descending
/// - ties broken by row index ascending (stable with respect to input order)
/// - NaN ranks below every real score
///
/// Returns the row indices in rank order.
pub fn rank_by_score_desc(scores: &[f64], pinned: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        let pin = |i: usize| pinned == Some(i);
        pin(b)
            .cmp(&pin(a))
            .then_with(|| rank_key(scores[b]).total_cmp(&rank_key(scores[a])))
            .then_with(|| a.cmp(&b))
    });
    order
}

#[inline]
fn rank_key(score: f64) -> f64 {
    if score.is_nan() { f64::NEG_INFINITY } else { score }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// baseline: sort (score desc, index asc) on explicit tuples
    fn baseline_rank(scores: &[f64], pinned: Option<usize>) -> Vec<usize> {
        let mut pairs: Vec<(bool, f64, usize)> = scores
            .iter()
            .copied()
            .enumerate()
            .map(|(i, s)| (pinned == Some(i), if s.is_nan() { f64::NEG_INFINITY } else { s }, i))
            .collect();
        pairs.sort_unstable_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| b.1.total_cmp(&a.1))
                .then_with(|| a.2.cmp(&b.2))
        });
        pairs.into_iter().map(|(_, _, i)| i).collect()
    }

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);

    impl Rng {
        fn new(seed: u32) -> Self {
            Self(seed)
        }

        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn rank_handles_empty_and_single() {
        assert!(rank_by_score_desc(&[], None).is_empty());
        assert!(rank_by_score_desc(&[], Some(0)).is_empty());
        assert_eq!(rank_by_score_desc(&[0.4], Some(0)), vec![0]);
    }

    #[test]
    fn rank_ties_prefer_lower_index() {
        let scores = [0.5, 0.2, 0.5, 1.0];
        assert_eq!(rank_by_score_desc(&scores, None), vec![3, 0, 2, 1]);
    }

    #[test]
    fn pinned_row_ranks_first_even_when_tied() {
        // row 1 duplicates the pinned row 3
        let scores = [0.1, 1.0, 0.3, 1.0];
        assert_eq!(rank_by_score_desc(&scores, Some(3)), vec![3, 1, 2, 0]);
        // pinned with a zero score still ranks first
        let scores = [0.0, 0.0, 0.0];
        assert_eq!(rank_by_score_desc(&scores, Some(2)), vec![2, 0, 1]);
    }

    #[test]
    fn nan_ranks_last() {
        let scores = [f64::NAN, 0.0, 0.7];
        assert_eq!(rank_by_score_desc(&scores, None), vec![2, 1, 0]);
    }

    #[test]
    fn rank_matches_baseline_many_sizes() {
        let mut rng = Rng::new(0x1234_5678);
        for &n in &[0usize, 1, 2, 3, 7, 16, 33, 128] {
            // coarse buckets make ties likely
            let scores: Vec<f64> = (0..n).map(|_| (rng.next_u32() % 5) as f64 / 4.0).collect();
            let pinned = if n > 0 { Some(rng.next_u32() as usize % n) } else { None };
            assert_eq!(rank_by_score_desc(&scores, pinned), baseline_rank(&scores, pinned), "n={n}");
        }
    }
}
