//! Mutation operators for permutation-encoded tours.

use crate::permutation::{is_permutation, Permutation};
use rand::Rng;

/// Produces one mutated copy of a tour
pub trait Mutation {
    fn mutate<R: Rng + ?Sized>(&self, p: &Permutation, rng: &mut R) -> Permutation;

    fn name(&self) -> &str;
}

/// Inversion mutation: reverse a random contiguous segment (a 2-opt move)
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentReversal;

impl Mutation for SegmentReversal {
    fn mutate<R: Rng + ?Sized>(&self, p: &Permutation, rng: &mut R) -> Permutation {
        reverse_subsequence(p, rng)
    }

    fn name(&self) -> &str {
        "SegmentReversal"
    }
}

/// Copy `p` and reverse `a..=b`, with `b` drawn from `1..n` and `a` from `0..b`.
///
/// Tours shorter than two points are returned as a plain copy.
pub fn reverse_subsequence<R: Rng + ?Sized>(p: &Permutation, rng: &mut R) -> Permutation {
    let n = p.len();
    if n < 2 {
        return p.clone();
    }

    let b = rng.gen_range(1..n);
    let a = rng.gen_range(0..b);
    reverse_between(p, a, b)
}

/// Copy `p` and reverse the inclusive segment `a..=b`.
pub fn reverse_between(p: &Permutation, a: usize, b: usize) -> Permutation {
    let mut q = p.clone();
    q.reverse_segment(a, b);
    debug_assert!(is_permutation(&q));
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reverse_between() {
        let p = Permutation::base(6);
        let q = reverse_between(&p, 1, 4);
        assert_eq!(q.as_slice(), &[0, 4, 3, 2, 1, 5]);
        assert!(p.is_base());
    }

    #[test]
    fn test_mutate_repeatedly() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut p = Permutation::base(4);
        for _ in 0..10 {
            p = SegmentReversal.mutate(&p, &mut rng);
            assert!(is_permutation(&p));
        }
    }

    #[test]
    fn test_two_points_always_swap() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let p = Permutation::base(2);
        for _ in 0..5 {
            assert_eq!(reverse_subsequence(&p, &mut rng).as_slice(), &[1, 0]);
        }
    }

    #[test]
    fn test_short_tours_are_copied() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for n in 0..2 {
            let p = Permutation::base(n);
            assert_eq!(reverse_subsequence(&p, &mut rng), p);
        }
    }

    proptest! {
        #[test]
        fn prop_mutation_keeps_permutation(
            (p, seed) in (2usize..50).prop_flat_map(|n| {
                (Just((0..n).collect::<Vec<usize>>()).prop_shuffle(), any::<u64>())
            })
        ) {
            let p = Permutation::try_from(p).unwrap();
            let original = p.clone();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let q = SegmentReversal.mutate(&p, &mut rng);
            prop_assert_eq!(q.len(), p.len());
            prop_assert!(is_permutation(&q));
            prop_assert_ne!(&q, &p);
            prop_assert_eq!(p, original);
        }
    }
}
