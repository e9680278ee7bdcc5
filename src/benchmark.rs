//! Benchmarking and experimentation module.
//!
//! Runs the genetic algorithm repeatedly with different seeds on one
//! instance, compares each run with the exhaustive optimum when the instance
//! is small enough, and exports the results.

use crate::error::{Result, TspError};
use crate::exact::BruteForceSolver;
use crate::heuristics::genetic::{GAConfig, GeneticAlgorithm};
use crate::instance::TspInstance;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Result of a single genetic algorithm run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Instance name
    pub instance: String,
    /// Number of points
    pub num_points: usize,
    /// Seed used for the run
    pub seed: u64,
    /// Incumbent tour distance at the end of the run
    pub distance: f64,
    /// Gap to the exhaustive optimum in percent (if available)
    pub gap_to_optimum: Option<f64>,
    /// Computation time in seconds
    pub time: f64,
    /// Generations performed
    pub generations: usize,
}

/// Aggregated statistics over all runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    pub num_runs: usize,
    pub best_distance: f64,
    pub avg_distance: f64,
    pub worst_distance: f64,
    pub std_distance: f64,
    pub avg_time: f64,
    /// Runs that reached the optimum (within 1e-9)
    pub num_optimal: Option<usize>,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of seeded runs
    pub num_runs: usize,
    /// Configuration for every run; the seed is overridden per run
    pub ga: GAConfig,
    /// Compute the exhaustive optimum when the instance is small enough
    pub run_exact: bool,
    /// Largest instance for which the exhaustive optimum is computed
    pub exact_max_points: usize,
}

/// Default size limit for the exhaustive optimum in benchmarks
pub const DEFAULT_EXACT_MAX_POINTS: usize = 10;

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 5,
            ga: GAConfig {
                generations: 10_000,
                ..Default::default()
            },
            run_exact: true,
            exact_max_points: DEFAULT_EXACT_MAX_POINTS,
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<RunResult>,
    optimum: Option<f64>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
            optimum: None,
        }
    }

    /// Run all seeded runs on an instance
    pub fn run(&mut self, instance: &TspInstance) -> Result<()> {
        log::info!("Running benchmark on instance: {}", instance.name);

        if self.config.run_exact {
            let solver = BruteForceSolver {
                max_points: self.config.exact_max_points,
            };
            match solver.solve(&instance.points) {
                Ok(solution) => self.optimum = Some(solution.distance),
                Err(TspError::TooLarge(n, max)) => {
                    log::info!("Skipping exhaustive optimum ({} points, limit {})", n, max);
                }
                Err(e) => return Err(e),
            }
        }

        for seed in 0..self.config.num_runs as u64 {
            let ga_config = GAConfig {
                seed: Some(seed),
                ..self.config.ga.clone()
            };

            let mut ga = GeneticAlgorithm::new(instance.points.clone(), ga_config)?;
            let solution = ga.run();

            let result = RunResult {
                instance: instance.name.clone(),
                num_points: instance.num_points(),
                seed,
                distance: solution.distance,
                gap_to_optimum: self
                    .optimum
                    .filter(|&best| best > 0.0)
                    .map(|best| (solution.distance - best) / best * 100.0),
                time: solution.computation_time,
                generations: solution.iterations.unwrap_or(0),
            };

            self.results.push(result);
        }

        Ok(())
    }

    /// Compute statistics over recorded runs
    pub fn compute_statistics(&self) -> Option<RunStatistics> {
        if self.results.is_empty() {
            return None;
        }

        let distances: Vec<f64> = self.results.iter().map(|r| r.distance).collect();
        let n = distances.len() as f64;
        let avg = distances.iter().sum::<f64>() / n;
        let variance = distances.iter().map(|d| (d - avg).powi(2)).sum::<f64>() / n;

        Some(RunStatistics {
            num_runs: self.results.len(),
            best_distance: distances.iter().cloned().fold(f64::INFINITY, f64::min),
            avg_distance: avg,
            worst_distance: distances.iter().cloned().fold(0.0, f64::max),
            std_distance: variance.sqrt(),
            avg_time: self.results.iter().map(|r| r.time).sum::<f64>() / n,
            num_optimal: self
                .optimum
                .map(|best| distances.iter().filter(|&&d| (d - best).abs() < 1e-9).count()),
        })
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TspError::io(path, e))?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush().map_err(|e| TspError::io(path, e))?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("      GA-TSP Benchmark Report\n");
        report.push_str("========================================\n\n");

        if let Some(best) = self.optimum {
            report.push_str(&format!("Exhaustive optimum: {:.4}\n\n", best));
        }

        report.push_str(&format!("{:>6} {:>12} {:>10} {:>10}\n", "Seed", "Distance", "Gap%", "Time"));
        report.push_str("-".repeat(42).as_str());
        report.push('\n');

        for result in &self.results {
            let gap_str = result
                .gap_to_optimum
                .map(|g| format!("{:.2}%", g))
                .unwrap_or_else(|| "-".to_string());

            report.push_str(&format!(
                "{:>6} {:>12.4} {:>10} {:>10.4}\n",
                result.seed, result.distance, gap_str, result.time
            ));
        }

        if let Some(stats) = self.compute_statistics() {
            report.push_str("-".repeat(42).as_str());
            report.push('\n');
            report.push_str(&format!(
                "Best {:.4}  Avg {:.4}  Worst {:.4}  Std {:.4}\n",
                stats.best_distance, stats.avg_distance, stats.worst_distance, stats.std_distance
            ));
            if let Some(optimal) = stats.num_optimal {
                report.push_str(&format!("Optimal runs: {}/{}\n", optimal, stats.num_runs));
            }
        }

        report
    }

    /// Get all results
    pub fn results(&self) -> &[RunResult] {
        &self.results
    }

    /// Exhaustive optimum, if it was computed
    pub fn optimum(&self) -> Option<f64> {
        self.optimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> TspInstance {
        TspInstance::from_coordinates(
            "rectangle",
            vec![vec![0.0, 0.0], vec![2.0, 2.0], vec![3.0, 1.0], vec![4.0, 2.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_runs, 5);
        assert!(config.run_exact);
        assert_eq!(config.exact_max_points, DEFAULT_EXACT_MAX_POINTS);
    }

    #[test]
    fn test_benchmark_runs_and_reports() {
        let config = BenchmarkConfig {
            num_runs: 3,
            ga: GAConfig {
                population_size: 6,
                generations: 500,
                ..Default::default()
            },
            run_exact: true,
            ..Default::default()
        };
        let mut benchmark = Benchmark::new(config);
        benchmark.run(&rectangle()).unwrap();

        assert_eq!(benchmark.results().len(), 3);
        assert!(benchmark.optimum().is_some());

        let stats = benchmark.compute_statistics().unwrap();
        assert_eq!(stats.num_runs, 3);
        assert_eq!(stats.num_optimal, Some(3));
        assert!(benchmark.generate_report().contains("Optimal runs: 3/3"));

        let path = std::env::temp_dir().join(format!("ga-tsp-{}-bench.csv", std::process::id()));
        benchmark.export_to_csv(&path).unwrap();
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with("instance,num_points,seed,distance"));
        assert_eq!(csv.lines().count(), 4);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_benchmark_skips_optimum_above_exact_limit() {
        let circle: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / 8.0;
                vec![angle.cos(), angle.sin()]
            })
            .collect();
        let instance = TspInstance::from_coordinates("circle", circle).unwrap();

        let config = BenchmarkConfig {
            num_runs: 2,
            ga: GAConfig {
                population_size: 4,
                generations: 10,
                ..Default::default()
            },
            run_exact: true,
            exact_max_points: 7,
        };
        let mut benchmark = Benchmark::new(config);
        benchmark.run(&instance).unwrap();

        assert!(benchmark.optimum().is_none());
        assert_eq!(benchmark.results().len(), 2);
        assert!(benchmark.results().iter().all(|r| r.gap_to_optimum.is_none()));
        assert_eq!(benchmark.compute_statistics().unwrap().num_optimal, None);
        assert!(!benchmark.generate_report().contains("Exhaustive optimum"));
    }

    #[test]
    fn test_benchmark_without_exact() {
        let config = BenchmarkConfig {
            num_runs: 1,
            ga: GAConfig {
                population_size: 4,
                generations: 10,
                ..Default::default()
            },
            run_exact: false,
            ..Default::default()
        };
        let mut benchmark = Benchmark::new(config);
        benchmark.run(&rectangle()).unwrap();

        assert!(benchmark.optimum().is_none());
        assert_eq!(benchmark.results()[0].gap_to_optimum, None);
    }
}
