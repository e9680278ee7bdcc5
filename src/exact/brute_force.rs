//! Exhaustive TSP solver.
//!
//! Walks every permutation in lexicographic order, starting from and
//! stopping at the base permutation, and keeps the shortest tour. The walk
//! is iterative so stack depth does not grow with the instance size.

use crate::error::{Result, TspError};
use crate::permutation::Permutation;
use crate::point::PointSet;
use crate::solution::Solution;
use std::time::Instant;

/// Largest instance the exhaustive solver accepts by default
pub const DEFAULT_MAX_POINTS: usize = 15;

/// `n!` for `n >= 2`, 1 otherwise. Saturates instead of overflowing.
pub fn factorial(n: usize) -> usize {
    (2..=n).fold(1usize, |acc, k| acc.saturating_mul(k))
}

/// Brute-force solver configuration
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    /// Instances with more points are refused
    pub max_points: usize,
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        BruteForceSolver {
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl BruteForceSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a shortest closed tour by trying all `n!` permutations
    pub fn solve(&self, points: &PointSet) -> Result<Solution> {
        let n = points.len();
        if n > self.max_points {
            return Err(TspError::TooLarge(n, self.max_points));
        }

        let start = Instant::now();
        log::info!("Enumerating {} tours over {} points", factorial(n), n);

        let mut perm = Permutation::base(n);
        let mut best = perm.clone();
        let mut best_distance = f64::MAX;
        let mut enumerated = 0usize;

        loop {
            let d = points.tour_distance(&perm);
            if d < best_distance {
                best_distance = d;
                best = perm.clone();
            }
            enumerated += 1;

            perm = perm.next_lexicographic();
            if perm.is_base() {
                break;
            }
        }

        let mut solution = Solution::from_tour(points, best, "BruteForce");
        solution.computation_time = start.elapsed().as_secs_f64();
        solution.iterations = Some(enumerated);
        Ok(solution)
    }
}
