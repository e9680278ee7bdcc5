//! Genetic Algorithm for the TSP.
//!
//! This module implements a steady generational loop with:
//! - Elitist pairing (the best ranked members mate pairwise)
//! - Replacement of the worst ranked members by the offspring
//! - Probabilistic mutation of each child
//! - An incumbent that never gets worse from one generation to the next
//!
//! The loop always runs the configured number of generations.

use crate::error::{Result, TspError};
use crate::heuristics::crossover::{Crossover, PartiallyMapped};
use crate::heuristics::mutation::{Mutation, SegmentReversal};
use crate::heuristics::population::Population;
use crate::permutation::{is_permutation, Permutation};
use crate::point::{DistanceMetric, PointSet};
use crate::solution::Solution;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Genetic Algorithm configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GAConfig {
    /// Population size
    pub population_size: usize,
    /// Number of generations
    pub generations: usize,
    /// Fraction of the population that mates each generation
    pub elite_fraction: f64,
    /// Probability that a child is mutated
    pub mutation_rate: f64,
    /// Random seed; `None` seeds from the operating system
    pub seed: Option<u64>,
    /// Edge length used to rank members and compare against the incumbent
    pub ranking: DistanceMetric,
    /// Generations between progress log lines (0 disables them)
    pub log_interval: usize,
}

impl Default for GAConfig {
    fn default() -> Self {
        GAConfig {
            population_size: 10,
            generations: 1_000_000,
            elite_fraction: 0.50,
            mutation_rate: 0.25,
            seed: None,
            ranking: DistanceMetric::Euclidean,
            log_interval: 10_000,
        }
    }
}

impl GAConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TspError::io(path, e))?;
        let config: GAConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::InvalidConfig(
                "population size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elite_fraction) {
            return Err(TspError::InvalidConfig(format!(
                "elite fraction {} is outside [0, 1]",
                self.elite_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::InvalidConfig(format!(
                "mutation rate {} is outside [0, 1]",
                self.mutation_rate
            )));
        }
        Ok(())
    }

    /// Number of members that mate each generation
    pub fn elite_count(&self) -> usize {
        elite_count(self.elite_fraction, self.population_size)
    }
}

/// `floor(elite_fraction * population_size)`, truncated to an even number.
pub fn elite_count(elite_fraction: f64, population_size: usize) -> usize {
    let k = ((elite_fraction * population_size as f64).floor() as usize).min(population_size);
    k - k % 2
}

/// Produce the next generation from `population`, leaving it untouched.
pub fn reproduce<C, M, R>(
    population: &Population,
    elite_fraction: f64,
    mutation_rate: f64,
    crossover: &C,
    mutation: &M,
    rng: &mut R,
) -> Population
where
    C: Crossover,
    M: Mutation,
    R: Rng + ?Sized,
{
    let mut next = population.clone();
    reproduce_in_place(&mut next, elite_fraction, mutation_rate, crossover, mutation, rng);
    next
}

/// One generation, applied directly to `population`.
///
/// Pairs `(0, 1), (2, 3), ...` of the best ranked members are crossed, each
/// child is mutated with probability `mutation_rate`, the children overwrite
/// the worst ranked members, the population is re-ranked and the incumbent
/// is replaced if the new best member strictly beats it. Returns whether the
/// incumbent improved.
///
/// # Panics
/// Panics if the population size changes, which would be a bug in the
/// operators.
pub fn reproduce_in_place<C, M, R>(
    population: &mut Population,
    elite_fraction: f64,
    mutation_rate: f64,
    crossover: &C,
    mutation: &M,
    rng: &mut R,
) -> bool
where
    C: Crossover,
    M: Mutation,
    R: Rng + ?Sized,
{
    let size = population.len();
    let k = elite_count(elite_fraction, size);

    let mut children = Vec::with_capacity(k);
    {
        let members = population.members();
        for i in (0..k).step_by(2) {
            let (u, v) = crossover.cross(&members[i].tour, &members[i + 1].tour, rng);
            children.push(u);
            children.push(v);
        }
    }

    for child in children.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *child = mutation.mutate(child, rng);
        }
    }

    population.replace_worst(children);
    population.sort();
    assert_eq!(population.len(), size, "population size drifted");

    population.update_incumbent()
}

/// Genetic Algorithm implementation
pub struct GeneticAlgorithm<C = PartiallyMapped, M = SegmentReversal> {
    config: GAConfig,
    points: Arc<PointSet>,
    crossover: C,
    mutation: M,
    population: Population,
    rng: ChaCha8Rng,
    generation: usize,
}

impl GeneticAlgorithm {
    /// PMX crossover and segment reversal mutation
    pub fn new(points: impl Into<Arc<PointSet>>, config: GAConfig) -> Result<Self> {
        Self::with_operators(points, config, PartiallyMapped, SegmentReversal)
    }
}

impl<C: Crossover, M: Mutation> GeneticAlgorithm<C, M> {
    pub fn with_operators(
        points: impl Into<Arc<PointSet>>,
        config: GAConfig,
        crossover: C,
        mutation: M,
    ) -> Result<Self> {
        config.validate()?;

        let points = points.into();
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let population = Population::random(
            Arc::clone(&points),
            config.population_size,
            config.ranking,
            &mut rng,
        );

        Ok(GeneticAlgorithm {
            config,
            points,
            crossover,
            mutation,
            population,
            rng,
            generation: 0,
        })
    }

    /// Put a known tour into the initial population.
    ///
    /// A tour that does not match the point count is ignored and the
    /// population stays random.
    pub fn seed_tour(&mut self, tour: &Permutation) -> bool {
        if self.population.seed(tour) {
            log::info!(
                "Seeded population with known tour of distance {:.2}",
                self.points.tour_distance(tour)
            );
            true
        } else {
            log::warn!(
                "Ignoring seed tour of length {} for {} points",
                tour.len(),
                self.points.len()
            );
            false
        }
    }

    /// Create new generation
    pub fn evolve(&mut self) -> bool {
        let improved = reproduce_in_place(
            &mut self.population,
            self.config.elite_fraction,
            self.config.mutation_rate,
            &self.crossover,
            &self.mutation,
            &mut self.rng,
        );
        self.generation += 1;

        if improved {
            log::debug!(
                "[GA] Gen {}  new incumbent {:.3}",
                self.generation,
                self.population.incumbent_distance()
            );
        }
        improved
    }

    /// Run the genetic algorithm
    pub fn run(&mut self) -> Solution {
        self.run_with_callback(|_, _| {})
    }

    /// Run all configured generations, calling `on_generation` after each one
    pub fn run_with_callback<F>(&mut self, mut on_generation: F) -> Solution
    where
        F: FnMut(usize, &Population),
    {
        let start = Instant::now();
        log::info!(
            "[GA] {} generations, population {}, elite {}, mutation rate {:.2}, {} + {}",
            self.config.generations,
            self.config.population_size,
            self.config.elite_count(),
            self.config.mutation_rate,
            self.crossover.name(),
            self.mutation.name()
        );

        for _ in 0..self.config.generations {
            self.evolve();
            on_generation(self.generation, &self.population);

            if self.config.log_interval > 0 && self.generation % self.config.log_interval == 0 {
                log::debug!(
                    "[GA] Gen {}  Best {:.3}  Diversity {:.2}  Elapsed {:.2}s",
                    self.generation,
                    self.population.incumbent_distance(),
                    self.population.diversity(),
                    start.elapsed().as_secs_f64()
                );
            }
        }

        assert!(
            is_permutation(&self.population.incumbent().tour)
                && self.population.incumbent().tour.len() == self.points.len(),
            "incumbent is not a tour of the {} points",
            self.points.len()
        );

        let mut solution = self.best_solution();
        solution.computation_time = start.elapsed().as_secs_f64();
        log::info!(
            "[GA] Finished after {} generations: distance {:.3}",
            self.generation,
            solution.distance
        );

        solution
    }

    /// Get current best solution
    pub fn best_solution(&self) -> Solution {
        let mut solution = Solution::from_tour(
            &self.points,
            self.population.incumbent().tour.clone(),
            "GeneticAlgorithm",
        );
        solution.iterations = Some(self.generation);
        solution
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &GAConfig {
        &self.config
    }

    /// Get current generation
    pub fn current_generation(&self) -> usize {
        self.generation
    }
}
