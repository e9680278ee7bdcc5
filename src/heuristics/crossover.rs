//! Crossover operators for permutation-encoded tours.
//!
//! Every operator takes two parents by reference and returns two freshly
//! allocated children. Parents are never modified.

use crate::permutation::{is_permutation, Permutation};
use rand::Rng;

/// Produces two children from two parents of equal length
pub trait Crossover {
    fn cross<R: Rng + ?Sized>(
        &self,
        p: &Permutation,
        q: &Permutation,
        rng: &mut R,
    ) -> (Permutation, Permutation);

    fn name(&self) -> &str;
}

/// Partially Mapped Crossover (PMX)
///
/// A prefix `0..=pivot` of each parent is transplanted into a copy of the
/// other one. Each transplanted value is swapped into place, so the value
/// it displaces moves to the slot the transplanted value vacated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartiallyMapped;

impl Crossover for PartiallyMapped {
    fn cross<R: Rng + ?Sized>(
        &self,
        p: &Permutation,
        q: &Permutation,
        rng: &mut R,
    ) -> (Permutation, Permutation) {
        pmx(p, q, rng)
    }

    fn name(&self) -> &str {
        "PMX"
    }
}

/// PMX with a pivot drawn uniformly from `0..n`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn pmx<R: Rng + ?Sized>(
    p: &Permutation,
    q: &Permutation,
    rng: &mut R,
) -> (Permutation, Permutation) {
    assert_eq!(p.len(), q.len(), "parents must have equal length");
    if p.is_empty() {
        return (p.clone(), q.clone());
    }

    let pivot = rng.gen_range(0..p.len());
    pmx_with_pivot(p, q, pivot)
}

/// PMX with an explicit pivot (inclusive end of the transplanted prefix).
///
/// # Panics
/// Panics if the parents have different lengths or `pivot >= n`.
pub fn pmx_with_pivot(p: &Permutation, q: &Permutation, pivot: usize) -> (Permutation, Permutation) {
    assert_eq!(p.len(), q.len(), "parents must have equal length");
    assert!(pivot < p.len(), "pivot {} out of range for length {}", pivot, p.len());

    let mut u = p.clone();
    let mut v = q.clone();
    let mut u_pos = inverse(&u);
    let mut v_pos = inverse(&v);

    for i in 0..=pivot {
        transplant(&mut u, &mut u_pos, i, q[i]);
        transplant(&mut v, &mut v_pos, i, p[i]);
    }

    debug_assert!(is_permutation(&u) && is_permutation(&v));
    (u, v)
}

/// `pos[value]` is the index of `value` in `perm`
fn inverse(perm: &Permutation) -> Vec<usize> {
    let mut pos = vec![0; perm.len()];
    for (i, &v) in perm.iter().enumerate() {
        pos[v] = i;
    }
    pos
}

/// Bring `value` to index `i` by swapping, keeping `pos` in sync.
#[inline]
fn transplant(child: &mut Permutation, pos: &mut [usize], i: usize, value: usize) {
    let j = pos[value];
    if i == j {
        return;
    }

    let displaced = child[i];
    child.swap(i, j);
    pos[value] = i;
    pos[displaced] = j;
}
