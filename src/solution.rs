//! Solution representation for the TSP.
//!
//! A [`Solution`] is the reporting record handed back to the caller: the
//! tour, its length and some bookkeeping about how it was found.

use crate::permutation::Permutation;
use crate::point::PointSet;
use serde::{Deserialize, Serialize};

/// Represents a solution to the TSP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The tour as a permutation of point indices
    pub tour: Permutation,
    /// Closed tour length
    pub distance: f64,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Number of iterations (generations or enumerated tours)
    pub iterations: Option<usize>,
}

impl Solution {
    /// Create a solution from a tour
    pub fn from_tour(points: &PointSet, tour: Permutation, algorithm: &str) -> Self {
        let distance = points.tour_distance(&tour);

        Solution {
            tour,
            distance,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// Get the position of a point in the tour
    pub fn position(&self, node: usize) -> Option<usize> {
        self.tour.position(node)
    }

    /// Get the point at a given position (circular)
    pub fn node_at(&self, pos: usize) -> usize {
        self.tour[pos % self.tour.len()]
    }

    /// Get the successor of a point in the tour
    pub fn successor(&self, node: usize) -> Option<usize> {
        self.position(node).map(|pos| self.node_at(pos + 1))
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Distance: {:.2}", self.distance)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  Iterations: {}", iter)?;
        }
        writeln!(f, "  Tour: {}", self.tour)
    }
}
