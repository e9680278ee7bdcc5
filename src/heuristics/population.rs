//! Population of candidate tours.
//!
//! Members are kept sorted by ascending cost, so index 0 is the best
//! ranked tour and the tail holds the worst. The incumbent is the best tour
//! seen since the population was created and need not be a current member.

use crate::permutation::Permutation;
use crate::point::{DistanceMetric, PointSet};
use ordered_float::OrderedFloat;
use rand::Rng;
use std::sync::Arc;

/// A tour together with its cached cost under the population's metric
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub tour: Permutation,
    pub cost: f64,
}

impl Individual {
    pub fn new(tour: Permutation, points: &PointSet, metric: DistanceMetric) -> Self {
        let cost = points.tour_cost(&tour, metric);
        Individual { tour, cost }
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    points: Arc<PointSet>,
    metric: DistanceMetric,
    members: Vec<Individual>,
    incumbent: Individual,
}

impl Population {
    /// `size` uniformly random tours, ranked, with the best as incumbent.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn random<R: Rng + ?Sized>(
        points: Arc<PointSet>,
        size: usize,
        metric: DistanceMetric,
        rng: &mut R,
    ) -> Self {
        let tours = (0..size)
            .map(|_| Permutation::random(points.len(), rng))
            .collect();
        Self::from_tours(points, tours, metric)
    }

    /// Build a ranked population from explicit tours.
    ///
    /// # Panics
    /// Panics if `tours` is empty or a tour does not cover the point set.
    pub fn from_tours(points: Arc<PointSet>, tours: Vec<Permutation>, metric: DistanceMetric) -> Self {
        assert!(!tours.is_empty(), "population must not be empty");

        let mut members: Vec<Individual> = tours
            .into_iter()
            .map(|t| Individual::new(t, &points, metric))
            .collect();
        members.sort_by_key(|ind| OrderedFloat(ind.cost));
        let incumbent = members[0].clone();

        Population {
            points,
            metric,
            members,
            incumbent,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Best ranked current member
    pub fn best(&self) -> &Individual {
        &self.members[0]
    }

    /// Worst ranked current member
    pub fn worst(&self) -> &Individual {
        &self.members[self.members.len() - 1]
    }

    /// Best tour found so far
    pub fn incumbent(&self) -> &Individual {
        &self.incumbent
    }

    /// Euclidean length of the incumbent, whatever the ranking metric
    pub fn incumbent_distance(&self) -> f64 {
        self.points.tour_distance(&self.incumbent.tour)
    }

    /// Cost of a tour under this population's metric
    pub fn evaluate(&self, tour: &Permutation) -> f64 {
        self.points.tour_cost(tour, self.metric)
    }

    /// Overwrite the best ranked member with a known tour, then re-rank.
    ///
    /// Returns false and leaves the population alone if the tour does not
    /// match the point count.
    pub fn seed(&mut self, tour: &Permutation) -> bool {
        if tour.len() != self.points.len() {
            return false;
        }

        self.members[0] = Individual::new(tour.clone(), &self.points, self.metric);
        self.sort();
        self.update_incumbent();
        true
    }

    /// Rank members by ascending cost
    pub fn sort(&mut self) {
        self.members.sort_by_key(|ind| OrderedFloat(ind.cost));
    }

    /// Overwrite the worst ranked slots with `children`: the first child
    /// takes the last slot, the second the one before, and so on.
    ///
    /// # Panics
    /// Panics if there are more children than members.
    pub(crate) fn replace_worst(&mut self, children: Vec<Permutation>) {
        let m = self.members.len();
        assert!(children.len() <= m, "more children than population slots");

        for (j, child) in children.into_iter().enumerate() {
            self.members[m - 1 - j] = Individual::new(child, &self.points, self.metric);
        }
    }

    /// Take a copy of the best member if it strictly beats the incumbent.
    pub(crate) fn update_incumbent(&mut self) -> bool {
        if self.members[0].cost < self.incumbent.cost {
            self.incumbent = self.members[0].clone();
            true
        } else {
            false
        }
    }

    /// Average number of differing positions between pairs of the first
    /// twenty members
    pub fn diversity(&self) -> f64 {
        if self.members.len() < 2 {
            return 0.0;
        }

        let sample = self.members.len().min(20);
        let mut total_diff = 0.0;
        let mut count = 0;

        for i in 0..sample {
            for j in i + 1..sample {
                let diff = self.members[i]
                    .tour
                    .iter()
                    .zip(self.members[j].tour.iter())
                    .filter(|(a, b)| a != b)
                    .count();
                total_diff += diff as f64;
                count += 1;
            }
        }

        total_diff / count as f64
    }
}
