use num::Num;

use crate::utils::math::vector::ZeroSpVec;

pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: &ZeroSpVec<N>, other: &ZeroSpVec<N>) -> f64;
    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    ///
    /// Both operands must have at least one non-zero element.
    fn cosine_similarity(vec: &ZeroSpVec<N>, other: &ZeroSpVec<N>) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot(vec: &ZeroSpVec<N>, other: &ZeroSpVec<N>) -> f64 {
        vec.dot::<f64>(other)
    }

    #[inline]
    fn cosine_similarity(vec: &ZeroSpVec<N>, other: &ZeroSpVec<N>) -> f64 {
        debug_assert!(
            !vec.is_all_zero() && !other.is_all_zero(),
            "cosine similarity of a zero vector is undefined"
        );
        let dot = vec.dot::<f64>(other);
        let norm_a = vec.norm_sq::<f64>();
        let norm_b = other.norm_sq::<f64>();
        // sqrt of the product keeps cos(a, a) at exactly 1.0
        (dot / (norm_a * norm_b).sqrt()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cos(a: &ZeroSpVec<f64>, b: &ZeroSpVec<f64>) -> f64 {
        <DefaultCompare as Compare<f64>>::cosine_similarity(a, b)
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = ZeroSpVec::from_vec(vec![1.3, 0.0, 2.7, 0.4]);
        let b = ZeroSpVec::from_vec(vec![0.0, 5.1, 1.9, 3.3]);
        assert_eq!(cos(&a, &b), cos(&b, &a));
    }

    #[test]
    fn self_similarity_is_exactly_one() {
        for v in [
            vec![1.0, 0.0, 0.0],
            vec![0.1, 0.2, 0.3],
            vec![1.6931471805599454, 1.6931471805599454, 0.0],
            vec![3.0e-5, 7.25, 0.0, 1.0e3],
        ] {
            let a = ZeroSpVec::from_vec(v);
            assert_eq!(cos(&a, &a), 1.0);
        }
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = ZeroSpVec::from_vec(vec![1.0, 0.0, 2.0, 0.0]);
        let b = ZeroSpVec::from_vec(vec![0.0, 4.0, 0.0, 1.0]);
        assert_eq!(cos(&a, &b), 0.0);
        assert_eq!(<DefaultCompare as Compare<f64>>::dot(&a, &b), 0.0);
    }

    #[test]
    fn non_negative_vectors_stay_in_unit_range() {
        let a = ZeroSpVec::from_vec(vec![0.5f32, 1.0, 0.0, 2.0]);
        let b = ZeroSpVec::from_vec(vec![0.25f32, 0.0, 3.0, 2.0]);
        let s = <DefaultCompare as Compare<f32>>::cosine_similarity(&a, &b);
        assert!((0.0..=1.0).contains(&s));
    }
}
