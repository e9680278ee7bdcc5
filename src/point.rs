//! Points, point sets and tour lengths.
//!
//! A [`PointSet`] is built once per run and never mutated afterwards. It
//! defines the index space that every [`Permutation`](crate::permutation::Permutation)
//! is a bijection over.

use crate::error::{Result, TspError};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An immutable point in n-dimensional space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    coords: Vec<f64>,
}

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Point { coords }
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point::new(coords)
    }
}

/// Sum of squared component-wise differences.
///
/// Points of different dimension are compared over their common prefix;
/// a [`PointSet`] never holds such points.
#[inline]
pub fn squared_distance(p: &Point, q: &Point) -> f64 {
    p.coords
        .iter()
        .zip(q.coords.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

/// Euclidean distance
#[inline]
pub fn distance(p: &Point, q: &Point) -> f64 {
    squared_distance(p, q).sqrt()
}

/// Which edge length is summed when ranking tours
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Sum of Euclidean edge lengths (the reported tour distance)
    #[default]
    Euclidean,
    /// Sum of squared edge lengths, no square roots
    Squared,
}

/// Ordered, non-empty collection of points sharing one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Build a point set, rejecting empty input and ragged dimensions.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let expected = match points.first() {
            Some(first) => first.dimension(),
            None => return Err(TspError::EmptyPointSet),
        };

        if let Some((index, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| p.dimension() != expected)
        {
            return Err(TspError::DimensionMismatch {
                index,
                expected,
                found: p.dimension(),
            });
        }

        Ok(PointSet { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension shared by every point
    pub fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Closed tour length: consecutive edges plus the edge back to the start.
    ///
    /// # Panics
    /// Panics if `tour.len()` differs from the number of points, or if the
    /// tour holds an index outside the set.
    pub fn tour_distance(&self, tour: &[usize]) -> f64 {
        self.closed_tour_sum(tour, distance)
    }

    /// Same as [`tour_distance`](Self::tour_distance) with squared edge lengths.
    pub fn tour_squared_distance(&self, tour: &[usize]) -> f64 {
        self.closed_tour_sum(tour, squared_distance)
    }

    /// Tour cost according to the selected metric
    pub fn tour_cost(&self, tour: &[usize], metric: DistanceMetric) -> f64 {
        match metric {
            DistanceMetric::Euclidean => self.tour_distance(tour),
            DistanceMetric::Squared => self.tour_squared_distance(tour),
        }
    }

    fn closed_tour_sum(&self, tour: &[usize], edge: fn(&Point, &Point) -> f64) -> f64 {
        assert_eq!(
            tour.len(),
            self.points.len(),
            "tour length must match the number of points"
        );

        let open: f64 = tour
            .windows(2)
            .map(|w| edge(&self.points[w[0]], &self.points[w[1]]))
            .sum();
        let closing = edge(&self.points[tour[tour.len() - 1]], &self.points[tour[0]]);

        open + closing
    }
}

impl Index<usize> for PointSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> PointSet {
        PointSet::new(vec![
            Point::new(vec![0.0, 0.0]),
            Point::new(vec![2.0, 2.0]),
            Point::new(vec![3.0, 1.0]),
            Point::new(vec![4.0, 2.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_distance_calculation() {
        let p = Point::new(vec![0.0, 0.0]);
        let q = Point::new(vec![3.0, 4.0]);

        assert!((squared_distance(&p, &q) - 25.0).abs() < 1e-10);
        assert!((distance(&p, &q) - 5.0).abs() < 1e-10);
        assert!((distance(&q, &p) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_three_dimensional_distance() {
        let p = Point::new(vec![1.0, 2.0, 3.0]);
        let q = Point::new(vec![2.0, 4.0, 5.0]);
        assert!((squared_distance(&p, &q) - 9.0).abs() < 1e-10);
        assert!((distance(&p, &q) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_tour_distance_closes_cycle() {
        let square = PointSet::new(vec![
            Point::new(vec![0.0, 0.0]),
            Point::new(vec![1.0, 0.0]),
            Point::new(vec![1.0, 1.0]),
            Point::new(vec![0.0, 1.0]),
        ])
        .unwrap();

        assert!((square.tour_distance(&[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
        assert!((square.tour_squared_distance(&[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
        // Crossing tour uses both diagonals
        let crossing = 2.0 + 2.0 * 2f64.sqrt();
        assert!((square.tour_distance(&[0, 2, 1, 3]) - crossing).abs() < 1e-10);
        assert!((square.tour_squared_distance(&[0, 2, 1, 3]) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_point_tour_is_zero() {
        let single = PointSet::new(vec![Point::new(vec![5.0, -1.0])]).unwrap();
        assert_eq!(single.tour_distance(&[0]), 0.0);
    }

    #[test]
    fn test_rotation_and_reversal_invariance() {
        let ps = rectangle();
        let tour = vec![0, 2, 3, 1];
        let base = ps.tour_distance(&tour);

        for shift in 0..tour.len() {
            let mut rotated = tour.clone();
            rotated.rotate_left(shift);
            assert!((ps.tour_distance(&rotated) - base).abs() < 1e-9);
        }

        let reversed: Vec<usize> = tour.iter().rev().cloned().collect();
        assert!((ps.tour_distance(&reversed) - base).abs() < 1e-9);
    }

    #[test]
    fn test_tour_cost_dispatch() {
        let ps = rectangle();
        let tour = [0, 1, 3, 2];
        assert_eq!(ps.tour_cost(&tour, DistanceMetric::Euclidean), ps.tour_distance(&tour));
        assert_eq!(ps.tour_cost(&tour, DistanceMetric::Squared), ps.tour_squared_distance(&tour));
    }

    #[test]
    #[should_panic]
    fn test_tour_length_mismatch_panics() {
        rectangle().tour_distance(&[0, 1, 2]);
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        assert!(matches!(PointSet::new(Vec::new()), Err(TspError::EmptyPointSet)));

        let ragged = PointSet::new(vec![
            Point::new(vec![0.0, 0.0]),
            Point::new(vec![1.0, 1.0, 1.0]),
        ]);
        assert!(matches!(
            ragged,
            Err(TspError::DimensionMismatch { index: 1, expected: 2, found: 3 })
        ));
    }
}
