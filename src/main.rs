//! GA-TSP Solver - Command Line Interface
//!
//! Solves the Traveling Salesman Problem with a genetic algorithm.

use clap::{Parser, Subcommand};
use ga_tsp_solver::benchmark::{Benchmark, BenchmarkConfig, DEFAULT_EXACT_MAX_POINTS};
use ga_tsp_solver::exact::BruteForceSolver;
use ga_tsp_solver::heuristics::genetic::{GAConfig, GeneticAlgorithm};
use ga_tsp_solver::instance::{load_tour, save_tour, TspInstance};
use ga_tsp_solver::point::DistanceMetric;
use ga_tsp_solver::Result;
use indicatif::{ProgressBar, ProgressStyle};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ga-tsp-solver")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "A genetic algorithm solver for the Traveling Salesman Problem")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the genetic algorithm on a point set
    Solve {
        /// CSV file with one point per line
        #[arg(short, long)]
        points: PathBuf,

        /// Persisted best-known tour: used as a seed if present, overwritten with the result
        #[arg(short, long)]
        best_tour: Option<PathBuf>,

        /// JSON configuration file (flags below override it)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of members in the population
        #[arg(long)]
        population_size: Option<usize>,

        /// Number of generations
        #[arg(short, long)]
        generations: Option<usize>,

        /// Fraction of the population that mates each generation
        #[arg(long)]
        elite_fraction: Option<f64>,

        /// Probability that a child is mutated
        #[arg(long)]
        mutation_rate: Option<f64>,

        /// Random seed (default: seeded from the operating system)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Rank tours by squared edge lengths
        #[arg(long)]
        squared_ranking: bool,

        /// Write the solution as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Enumerate every tour (at most 15 points)
    Exact {
        /// CSV file with one point per line
        #[arg(short, long)]
        points: PathBuf,
    },

    /// Run the genetic algorithm several times with different seeds
    Benchmark {
        /// CSV file with one point per line
        #[arg(short, long)]
        points: PathBuf,

        /// Number of runs
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Generations per run
        #[arg(short, long, default_value = "10000")]
        generations: usize,

        /// Number of members in the population
        #[arg(long, default_value = "10")]
        population_size: usize,

        /// Largest instance for which the exhaustive optimum is computed
        #[arg(long, default_value_t = DEFAULT_EXACT_MAX_POINTS)]
        exact_limit: usize,

        /// Skip the exhaustive optimum
        #[arg(long)]
        no_exact: bool,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Settings of the `solve` command
struct SolveArgs {
    points: PathBuf,
    best_tour: Option<PathBuf>,
    config: Option<PathBuf>,
    population_size: Option<usize>,
    generations: Option<usize>,
    elite_fraction: Option<f64>,
    mutation_rate: Option<f64>,
    seed: Option<u64>,
    squared_ranking: bool,
    output: Option<PathBuf>,
    quiet: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve {
            points,
            best_tour,
            config,
            population_size,
            generations,
            elite_fraction,
            mutation_rate,
            seed,
            squared_ranking,
            output,
            quiet,
        } => solve_instance(SolveArgs {
            points,
            best_tour,
            config,
            population_size,
            generations,
            elite_fraction,
            mutation_rate,
            seed,
            squared_ranking,
            output,
            quiet,
        }),

        Commands::Exact { points } => solve_exact(&points),

        Commands::Benchmark {
            points,
            runs,
            generations,
            population_size,
            exact_limit,
            no_exact,
            output,
        } => {
            let config = BenchmarkConfig {
                num_runs: runs,
                ga: GAConfig {
                    population_size,
                    generations,
                    ..Default::default()
                },
                run_exact: !no_exact,
                exact_max_points: exact_limit,
            };
            run_benchmark(&points, config, output)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(args: &SolveArgs) -> Result<GAConfig> {
    let mut config = match &args.config {
        Some(path) => GAConfig::from_file(path)?,
        None => GAConfig::default(),
    };

    if let Some(size) = args.population_size {
        config.population_size = size;
    }
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(fraction) = args.elite_fraction {
        config.elite_fraction = fraction;
    }
    if let Some(rate) = args.mutation_rate {
        config.mutation_rate = rate;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.squared_ranking {
        config.ranking = DistanceMetric::Squared;
    }

    config.validate()?;
    Ok(config)
}

fn solve_instance(args: SolveArgs) -> Result<()> {
    println!("Loading points from {:?}...", args.points);
    let instance = TspInstance::from_csv(&args.points)?;
    let config = build_config(&args)?;
    let generations = config.generations;

    let mut ga = GeneticAlgorithm::new(instance.points.clone(), config)?;

    if let Some(path) = &args.best_tour {
        match load_tour(path)? {
            Some(tour) => {
                ga.seed_tour(&tour);
            }
            None => println!("No persisted tour at {:?}, starting from random tours", path),
        }
    }

    println!("Solving {} ({} points) over {} generations...", instance.name, instance.num_points(), generations);

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(generations as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} gen  {msg}  [{elapsed_precise}]") {
            pb.set_style(style);
        }
        pb
    };

    let step = (generations / 1000).max(1);
    let solution = ga.run_with_callback(|generation, population| {
        if generation % step == 0 || generation == generations {
            progress.set_position(generation as u64);
            progress.set_message(format!("best {:.2}", population.incumbent_distance()));
        }
    });
    progress.finish_and_clear();

    println!("Path: {}\nDist: {:.2}", solution.tour, solution.distance);
    println!("Time: {:.4}s", solution.computation_time);

    if let Some(path) = &args.best_tour {
        save_tour(path, &solution.tour)?;
        println!("Best tour saved to {:?}", path);
    }

    if let Some(out_path) = &args.output {
        let json = serde_json::to_string_pretty(&solution)?;
        std::fs::write(out_path, json).map_err(|e| ga_tsp_solver::TspError::io(out_path, e))?;
        println!("Solution saved to {:?}", out_path);
    }

    Ok(())
}

fn solve_exact(path: &PathBuf) -> Result<()> {
    let instance = TspInstance::from_csv(path)?;
    print!("{}", instance.statistics());

    let solution = BruteForceSolver::new().solve(&instance.points)?;
    println!("\n{}", solution);
    Ok(())
}

fn run_benchmark(path: &PathBuf, config: BenchmarkConfig, output: Option<PathBuf>) -> Result<()> {
    let instance = TspInstance::from_csv(path)?;
    config.ga.validate()?;

    println!(
        "Benchmarking {} (n={}) with {} runs...",
        instance.name,
        instance.num_points(),
        config.num_runs
    );

    let mut benchmark = Benchmark::new(config);
    benchmark.run(&instance)?;

    println!("\n{}", benchmark.generate_report());

    if let Some(out_path) = output {
        benchmark.export_to_csv(&out_path)?;
        println!("Results exported to {:?}", out_path);
    }

    Ok(())
}
