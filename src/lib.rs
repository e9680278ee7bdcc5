//! GA-TSP Solver Library
//!
//! A genetic algorithm for the Traveling Salesman Problem over
//! permutation-encoded tours.
//!
//! # Features
//!
//! - Points in any dimension, Euclidean or squared-Euclidean tour ranking
//! - Partially Mapped Crossover (PMX) and segment reversal mutation
//! - Elitist generational loop with a never-worsening incumbent
//! - Exhaustive lexicographic solver for small instances
//! - Seeded benchmarking with CSV export
//!
//! # Example
//!
//! ```no_run
//! use ga_tsp_solver::instance::{load_tour, TspInstance};
//! use ga_tsp_solver::heuristics::genetic::{GAConfig, GeneticAlgorithm};
//!
//! let instance = TspInstance::from_csv("cities.csv").unwrap();
//! let config = GAConfig { generations: 10_000, seed: Some(42), ..Default::default() };
//!
//! let mut ga = GeneticAlgorithm::new(instance.points, config).unwrap();
//! if let Some(tour) = load_tour("shortestpath.csv").unwrap() {
//!     ga.seed_tour(&tour);
//! }
//! let solution = ga.run();
//!
//! println!("Path: {}\nDist: {:.2}", solution.tour, solution.distance);
//! ```

pub mod error;
pub mod point;
pub mod permutation;
pub mod instance;
pub mod solution;
pub mod heuristics;
pub mod exact;
pub mod benchmark;

pub use error::{Result, TspError};
pub use instance::TspInstance;
pub use permutation::Permutation;
pub use point::{DistanceMetric, Point, PointSet};
pub use solution::Solution;
