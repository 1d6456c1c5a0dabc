//! Road Network Tour Solver - Command Line Interface
//!
//! Loads a road network from JSON, takes a list of points of interest, and
//! computes a visiting order plus the full node-level route.

use clap::{Parser, Subcommand};
use road_tour_solver::network::NetworkData;
use road_tour_solver::solvers::{solve_tour, Algorithm, ExactConfig, GaConfig, SolveOptions};

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "road-tour-solver")]
#[command(version = "1.0")]
#[command(about = "Tour planning over road networks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a tour over the given network and points
    Solve {
        /// Road network JSON file ({"nodes": [...], "edges": [...]})
        #[arg(short, long)]
        network: PathBuf,

        /// Points of interest: comma-separated node ids
        #[arg(short, long, value_delimiter = ',')]
        points: Option<Vec<String>>,

        /// Points of interest: file with one node id per line
        #[arg(long, conflicts_with = "points")]
        points_file: Option<PathBuf>,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "genetic")]
        algorithm: Algorithm,

        /// Time limit in seconds (exact solver)
        #[arg(short, long, default_value = "30")]
        time_limit: f64,

        /// Random seed (genetic solver)
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Population size (genetic solver)
        #[arg(long, default_value = "50")]
        population_size: usize,

        /// Generations (genetic solver)
        #[arg(long, default_value = "100")]
        generations: usize,

        /// Mutation rate (genetic solver)
        #[arg(long, default_value = "0.02")]
        mutation_rate: f64,

        /// Write the route result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run all three solvers on one input and compare
    Compare {
        /// Road network JSON file
        #[arg(short, long)]
        network: PathBuf,

        /// Points of interest: comma-separated node ids
        #[arg(short, long, value_delimiter = ',')]
        points: Option<Vec<String>>,

        /// Points of interest: file with one node id per line
        #[arg(long, conflicts_with = "points")]
        points_file: Option<PathBuf>,

        /// Time limit in seconds (exact solver)
        #[arg(short, long, default_value = "30")]
        time_limit: f64,

        /// Random seed (genetic solver)
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            network,
            points,
            points_file,
            algorithm,
            time_limit,
            seed,
            population_size,
            generations,
            mutation_rate,
            output,
        } => {
            let network = load_network(&network);
            let points = load_points(points, points_file.as_deref());

            let options = SolveOptions {
                algorithm,
                exact: ExactConfig { time_limit },
                ga: GaConfig {
                    seed,
                    population_size,
                    generations,
                    mutation_rate,
                    ..GaConfig::default()
                },
            };

            println!("Solving with {:?} over {} points...", algorithm, points.len());
            let result = match solve_tour(&network, &points, &options) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            println!("{}", result);

            if let Some(path) = output {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => {
                        if let Err(e) = fs::write(&path, json) {
                            eprintln!("Error writing output: {}", e);
                            std::process::exit(1);
                        }
                        println!("Result written to {:?}", path);
                    }
                    Err(e) => {
                        eprintln!("Error serializing result: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Compare {
            network,
            points,
            points_file,
            time_limit,
            seed,
        } => {
            let network = load_network(&network);
            let points = load_points(points, points_file.as_deref());

            println!("Comparing algorithms over {} points...\n", points.len());
            println!(
                "{:<18} {:>12} {:>12} {:>14}",
                "Algorithm", "Distance", "Time (s)", "Status"
            );

            for algorithm in [Algorithm::Exact, Algorithm::NearestNeighbor, Algorithm::Genetic] {
                let options = SolveOptions {
                    algorithm,
                    exact: ExactConfig { time_limit },
                    ga: GaConfig {
                        seed,
                        ..GaConfig::default()
                    },
                };

                match solve_tour(&network, &points, &options) {
                    Ok(result) => println!(
                        "{:<18} {:>12.2} {:>12.4} {:>14}",
                        result.algorithm,
                        result.distance,
                        result.computation_time,
                        format!("{:?}", result.status)
                    ),
                    Err(e) => println!("{:<18} failed: {}", format!("{:?}", algorithm), e),
                }
            }
        }
    }
}

fn load_network(path: &Path) -> NetworkData {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading network file {:?}: {}", path, e);
            std::process::exit(1);
        }
    };

    match serde_json::from_str(&contents) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Error parsing network file {:?}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn load_points(inline: Option<Vec<String>>, file: Option<&Path>) -> Vec<String> {
    let points = match (inline, file) {
        (Some(points), _) => points,
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(contents) => contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) => {
                eprintln!("Error reading points file {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("Error: provide --points or --points-file");
            std::process::exit(1);
        }
    };

    if points.is_empty() {
        eprintln!("Error: the point list is empty");
        std::process::exit(1);
    }

    points
}
