//! Validation errors raised by the GA.

use crate::distance::Gene;

/// Errors returned by GA construction and operators.
///
/// Every variant is a fail-fast validation failure at the boundary of the
/// offending call. Nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("Population size cannot be less or equal 0")]
    InvalidPopulationSize,

    #[error("Number of generations cannot be less or equal 0")]
    InvalidGenerationCount,

    #[error("{name} probability has to be in range <0,1>, got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Drop fraction has to be in range <0,1), got {0}")]
    InvalidDropFraction(f64),

    #[error("Maximum gene {max} cannot be smaller than minimum gene {min}")]
    InvalidRange { min: Gene, max: Gene },

    #[error("Starting gene {gene} is not a valid key in range <{min},{max}>")]
    InvalidStartingGene { gene: Gene, min: Gene, max: Gene },

    #[error("Restricted candidate list size has to be at least 1")]
    InvalidRclSize,

    #[error("Crossover breakpoint cannot be bigger than {max}")]
    BreakpointOutOfRange { breakpoint: usize, max: usize },

    #[error("Parents must have equal genome length, got {left} and {right}")]
    ParentLengthMismatch { left: usize, right: usize },

    #[error("Size of a sublist of individuals for tournament has to be provided")]
    MissingSampleSize,

    #[error("The size of the population ({available}) is too small to pick {requested} individuals")]
    SampleTooLarge { available: usize, requested: usize },

    #[error("Distance model contains no points")]
    EmptyDistanceModel,

    #[error("Gene {gene} has no unvisited neighbor left, the tour cannot be completed")]
    IncompleteNeighbors { gene: Gene },

    #[error("Gene {gene} is not a point of the distance model")]
    UnknownGene { gene: Gene },

    #[error("Population has no individuals")]
    EmptyPopulation,
}
