//! Genetic algorithm for the travelling salesman problem.
//!
//! Searches for a short closed tour through a set of points:
//!
//! - **Distance models** ([`distance`]): the problem side of the search.
//!   Any type implementing [`distance::DistanceModel`] supplies point keys,
//!   pairwise costs and nearest-neighbor lists.
//! - **Genetic Algorithm** ([`ga`]): tours as permutations with a fixed
//!   starting point, random or greedy randomized (GRASP) seeding,
//!   tournament selection over an elite pool, partially mapped crossover
//!   and swap mutation.
//! - **TSPLIB** ([`tsplib`]): reader for geographical (`GEO`) instances
//!   and their distance matrices.
//!
//! # Example
//!
//! ```
//! use tsp_ga::distance::DistanceMatrix;
//! use tsp_ga::ga::{GaConfig, GaRunner, InitialTour};
//!
//! let model = DistanceMatrix::from_fn(1..=8, |a, b| u64::from(a.abs_diff(b)) * 10);
//! let config = GaConfig::new(40, 60, 0.2, 0.5)
//!     .with_initial_tour(InitialTour::GreedyRandomized { rcl_size: 2 })
//!     .with_seed(42);
//! let result = GaRunner::new(config, &model)?.run()?;
//! assert!(result.best_fitness >= 140);
//! # Ok::<(), tsp_ga::ga::GaError>(())
//! ```
//!
//! Progress is reported through [`tracing`]; install a subscriber to see it.

pub mod distance;
pub mod ga;
pub mod random;
pub mod tsplib;
