use std::cmp::Ordering;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// ドット積
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// Walks both index lists once (merge join).
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut result = 0_f64;

        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += (*va).into() * (*vb).into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    /// Σ(a_i^2)
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.raw_iter()
            .map(|(_, v)| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum()
    }

    /// ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// コサイン類似度
    /// cos(θ) = a・b / (||a|| * ||b||)
    ///
    /// Similarity against a zero vector is defined as 0.
    /// For non-negative vectors the result lies in [0, 1].
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(len: usize, pairs: &[(u32, f64)]) -> ZeroSpVec<f64> {
        ZeroSpVec::from_pairs(len, pairs.to_vec())
    }

    #[test]
    fn dot_only_counts_shared_indices() {
        let a = sp(5, &[(0, 1.0), (2, 2.0), (4, 3.0)]);
        let b = sp(5, &[(1, 5.0), (2, 4.0), (4, 1.0)]);
        assert_eq!(a.dot(&b), 2.0 * 4.0 + 3.0 * 1.0);
        assert_eq!(a.norm_sq(), 14.0);
    }

    #[test]
    fn cosine_self_is_one() {
        let a = sp(4, &[(0, 0.3), (3, 1.7)]);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-9);

        let b: ZeroSpVec<f32> = ZeroSpVec::from_pairs(3, vec![(1, 0.25_f32), (2, 3.5)]);
        assert!((b.cosine_similarity(&b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let a = sp(3, &[(1, 1.0)]);
        let zero = sp(3, &[]);
        assert_eq!(a.cosine_similarity(&zero), 0.0);
        assert_eq!(zero.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn cosine_disjoint_is_zero() {
        let a = sp(4, &[(0, 1.0), (1, 1.0)]);
        let b = sp(4, &[(2, 1.0), (3, 1.0)]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }
}
