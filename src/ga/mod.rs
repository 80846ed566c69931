//! Genetic Algorithm for closed tours.
//!
//! Tours are permutations of [`Gene`](crate::distance::Gene) keys that all
//! begin at a fixed starting key; fitness is the total cycle cost under a
//! [`DistanceModel`](crate::distance::DistanceModel), lower is better.
//!
//! # Key Types
//!
//! - [`Individual`]: A tour with its cached fitness
//! - [`Population`]: One generation, its statistics and elite pool
//! - [`GaConfig`]: Algorithm parameters (population size, probabilities, strategies)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour and per-generation statistics
//!
//! # Strategies
//!
//! - [`InitialTour`]: Random shuffle or greedy randomized (GRASP) construction
//! - [`Selection`]: Tournament selection over the elite pool
//! - [`Crossover`]: Single-breakpoint partially mapped crossover (PMX)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"

mod config;
mod crossover;
mod error;
mod individual;
mod initial;
mod population;
mod runner;
mod selection;

pub use config::{BestOf, GaConfig};
pub use crossover::Crossover;
pub use error::GaError;
pub use individual::Individual;
pub use initial::InitialTour;
pub use population::Population;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::Selection;

/// Synthetic distance models with known optimal tours, shared by unit tests
/// and benches.
#[doc(hidden)]
pub mod test_support {
    use crate::distance::{Cost, DistanceMatrix};

    /// Keys `1..=n` on a line, 10 apart. The optimal tour costs `20 * (n - 1)`.
    pub fn line_model(n: u32) -> DistanceMatrix {
        DistanceMatrix::from_fn(1..=n, |a, b| Cost::from(a.abs_diff(b)) * 10)
    }

    /// Keys `1..=n` evenly spaced on a circle of radius 1000, costs are
    /// rounded Euclidean distances. For `n >= 3` the tour `1, 2, .., n` is
    /// optimal.
    pub fn circle_model(n: u32) -> DistanceMatrix {
        let point = |k: u32| {
            let angle = std::f64::consts::TAU * f64::from(k) / f64::from(n);
            (1000.0 * angle.cos(), 1000.0 * angle.sin())
        };
        DistanceMatrix::from_fn(1..=n, |a, b| {
            let (ax, ay) = point(a);
            let (bx, by) = point(b);
            (ax - bx).hypot(ay - by).round() as Cost
        })
    }
}
