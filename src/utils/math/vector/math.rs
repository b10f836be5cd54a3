use std::{cmp::Ordering, ops::AddAssign};

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Dot product over the stored entries of both vectors.
    ///
    /// # Arguments
    /// * `other` - the other vector, same logical length
    ///
    /// # Returns
    /// * `R` - Σ(a_i * b_i) accumulated in `R`
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let (self_inds, self_vals) = self.raw_parts();
        let (other_inds, other_vals) = other.raw_parts();

        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    result += self_vals[i].into() * other_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Σ(a_i^2)
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for (_, val) in self.raw_iter() {
            let val: R = (*val).into();
            result += val * val;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_skips_disjoint_indices() {
        let a = ZeroSpVec::from_vec(vec![1.0, 0.0, 2.0, 0.0]);
        let b = ZeroSpVec::from_vec(vec![0.0, 3.0, 4.0, 5.0]);
        assert_eq!(a.dot::<f64>(&b), 8.0);
        assert_eq!(b.dot::<f64>(&a), 8.0);
    }

    #[test]
    fn norm_sq_of_integers_widens() {
        let a = ZeroSpVec::from_vec(vec![3u32, 0, 4]);
        assert_eq!(a.norm_sq::<f64>(), 25.0);
    }
}
