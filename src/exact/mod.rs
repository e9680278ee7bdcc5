//! Exact solvers module.
//!
//! Exhaustive enumeration for small instances, used as a baseline to check
//! the genetic algorithm against.

mod brute_force;

pub use brute_force::*;
