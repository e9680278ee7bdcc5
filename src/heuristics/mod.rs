//! Heuristics module for the TSP.
//!
//! This module exports the genetic algorithm and its operators.

pub mod crossover;
pub mod mutation;
pub mod population;
pub mod genetic;

pub use crossover::*;
pub use mutation::*;
pub use population::*;
pub use genetic::*;
