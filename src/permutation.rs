//! Permutations of `0..n`, the encoding of a tour.
//!
//! A [`Permutation`] can only be built from a checked vector or by the
//! generators below, and only exposes in-place edits that keep it a
//! bijection ([`swap`](Permutation::swap) and
//! [`reverse_segment`](Permutation::reverse_segment)). Operators therefore
//! never need a repair pass.

use crate::error::TspError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A bijection on `0..n`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation(Vec<usize>);

/// Check that every value of `0..p.len()` appears exactly once in `p`.
pub fn is_permutation(p: &[usize]) -> bool {
    let mut seen = vec![false; p.len()];
    for &v in p {
        if v >= p.len() || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

impl Permutation {
    /// The identity permutation `0, 1, ..., n-1`
    pub fn base(n: usize) -> Self {
        Permutation((0..n).collect())
    }

    /// A uniformly random permutation (Fisher-Yates over the base permutation)
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut values: Vec<usize> = (0..n).collect();
        values.shuffle(rng);
        Permutation(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Whether this is the identity permutation
    pub fn is_base(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &v)| i == v)
    }

    /// Index holding `value`, if any
    pub fn position(&self, value: usize) -> Option<usize> {
        self.0.iter().position(|&v| v == value)
    }

    /// Exchange the values at two positions.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// Reverse the inclusive segment `a..=b`.
    ///
    /// # Panics
    /// Panics if `a > b` or `b` is out of bounds.
    pub fn reverse_segment(&mut self, a: usize, b: usize) {
        self.0[a..=b].reverse();
    }

    /// Next permutation in lexicographic order, wrapping around to the base
    /// permutation after the last one (`n-1, ..., 1, 0`).
    pub fn next_lexicographic(&self) -> Permutation {
        let n = self.0.len();

        // Largest k with p[k] < p[k+1]
        let k = match (0..n.saturating_sub(1)).rev().find(|&i| self.0[i] < self.0[i + 1]) {
            Some(k) => k,
            None => return Permutation::base(n),
        };

        // Largest j > k with p[k] < p[j]; exists since p[k] < p[k+1]
        let j = (k + 1..n)
            .rev()
            .find(|&i| self.0[k] < self.0[i])
            .unwrap_or(k + 1);

        let mut next = self.0.clone();
        next.swap(k, j);
        next[k + 1..].reverse();
        Permutation(next)
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = TspError;

    fn try_from(values: Vec<usize>) -> Result<Self, Self::Error> {
        if is_permutation(&values) {
            Ok(Permutation(values))
        } else {
            Err(TspError::InvalidTour(format!(
                "{:?} is not a permutation of 0..{}",
                values,
                values.len()
            )))
        }
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}

impl Deref for Permutation {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_base_permutation() {
        assert_eq!(Permutation::base(4).as_slice(), &[0, 1, 2, 3]);
        assert!(Permutation::base(4).is_base());
        assert!(Permutation::base(0).is_empty());
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[]));
        assert!(is_permutation(&[0]));
        assert!(is_permutation(&[2, 0, 1]));
        assert!(!is_permutation(&[0, 0, 1]));
        assert!(!is_permutation(&[0, 1, 3]));
        assert!(!is_permutation(&[1]));
    }

    #[test]
    fn test_random_permutations_are_valid_and_independent() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut a = Permutation::random(20, &mut rng);
        let b = Permutation::random(20, &mut rng);
        assert!(is_permutation(&a));
        assert!(is_permutation(&b));

        let before = b.clone();
        a.swap(0, 19);
        assert_eq!(b, before);
    }

    #[test]
    fn test_copy_is_independent() {
        let p = Permutation::try_from(vec![3, 1, 0, 2]).unwrap();
        let mut q = p.clone();
        assert_eq!(p, q);

        q.reverse_segment(0, 3);
        assert_eq!(p.as_slice(), &[3, 1, 0, 2]);
        assert_eq!(q.as_slice(), &[2, 0, 1, 3]);
    }

    #[test]
    fn test_try_from_rejects_non_bijection() {
        assert!(Permutation::try_from(vec![1, 2, 0]).is_ok());
        assert!(matches!(
            Permutation::try_from(vec![1, 1, 0]),
            Err(TspError::InvalidTour(_))
        ));
    }

    #[test]
    fn test_next_lexicographic_steps() {
        let p = Permutation::try_from(vec![0, 2, 1]).unwrap();
        assert_eq!(p.next_lexicographic().as_slice(), &[1, 0, 2]);

        let last = Permutation::try_from(vec![2, 1, 0]).unwrap();
        assert!(last.next_lexicographic().is_base());
    }

    #[test]
    fn test_next_lexicographic_cycles_through_all() {
        for n in 3..=5 {
            let factorial: usize = (1..=n).product();
            let mut seen = HashSet::new();
            let mut p = Permutation::base(n);

            for _ in 0..factorial {
                assert!(is_permutation(&p));
                assert!(seen.insert(p.clone()), "repeated {} for n={}", p, n);
                p = p.next_lexicographic();
            }

            assert!(p.is_base(), "n={} did not return to base", n);
            assert_eq!(seen.len(), factorial);
        }
    }

    #[test]
    fn test_next_lexicographic_trivial_sizes() {
        assert!(Permutation::base(0).next_lexicographic().is_empty());
        assert!(Permutation::base(1).next_lexicographic().is_base());
    }

    #[test]
    fn test_serde_validates() {
        let p: Permutation = serde_json::from_str("[2,0,1]").unwrap();
        assert_eq!(p.as_slice(), &[2, 0, 1]);
        assert!(serde_json::from_str::<Permutation>("[2,2,1]").is_err());
        assert_eq!(serde_json::to_string(&p).unwrap(), "[2,0,1]");
    }
}
