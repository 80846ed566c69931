//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! seed generation → (selection → crossover → mutation → evaluation) × N.

use super::config::{BestOf, GaConfig};
use super::error::GaError;
use super::individual::Individual;
use super::population::Population;
use crate::distance::{Cost, DistanceModel, Gene};
use crate::random::create_rng;
use rand::Rng;
use std::cmp::Ordering;

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the seed generation.
    pub generation: usize,
    pub best_fitness: Cost,
    pub worst_fitness: Cost,
    /// Rounded-down mean.
    pub average_fitness: Cost,
}

impl GenerationStats {
    fn of(generation: usize, population: &Population) -> Option<Self> {
        Some(Self {
            generation,
            best_fitness: population.best_fitness()?,
            worst_fitness: population.worst_fitness()?,
            average_fitness: population.average_fitness()?,
        })
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The reported tour, chosen according to [`GaConfig::best_of`].
    pub best: Individual,

    /// Cost of `best`.
    pub best_fitness: Cost,

    /// Number of successor generations executed.
    pub generations: usize,

    /// Statistics of generation 0 followed by every successor.
    pub history: Vec<GenerationStats>,
}

/// Executes the GA evolutionary loop over a distance model.
///
/// # Usage
///
/// ```
/// use tsp_ga::distance::DistanceMatrix;
/// use tsp_ga::ga::{GaConfig, GaRunner};
///
/// let model = DistanceMatrix::from_fn(1..=6, |a, b| u64::from(a.abs_diff(b)));
/// let config = GaConfig::new(20, 30, 0.2, 0.5).with_seed(42);
/// let result = GaRunner::new(config, &model).unwrap().run().unwrap();
/// assert_eq!(result.best.genome()[0], 1);
/// assert_eq!(result.history.len(), 31);
/// ```
#[derive(Debug)]
pub struct GaRunner<'m, M: DistanceModel + ?Sized> {
    config: GaConfig,
    model: &'m M,
    starting_key: Gene,
}

impl<'m, M: DistanceModel + ?Sized> GaRunner<'m, M> {
    /// Validates `config` against `model`.
    ///
    /// # Errors
    /// Any error of [`GaConfig::validate`], [`GaError::EmptyDistanceModel`],
    /// or [`GaError::InvalidStartingGene`] when the configured starting key
    /// is not a model key.
    pub fn new(config: GaConfig, model: &'m M) -> Result<Self, GaError> {
        config.validate()?;

        let (min, max) = model.key_range().ok_or(GaError::EmptyDistanceModel)?;
        let starting_key = config.starting_key.unwrap_or(min);
        if !model.contains(starting_key) {
            return Err(GaError::InvalidStartingGene {
                gene: starting_key,
                min,
                max,
            });
        }

        Ok(Self {
            config,
            model,
            starting_key,
        })
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Home base shared by every tour of the run.
    pub fn starting_key(&self) -> Gene {
        self.starting_key
    }

    /// Runs the GA with a generator seeded from [`GaConfig::seed`]
    /// (random when unset).
    pub fn run(&self) -> Result<GaResult, GaError> {
        let mut rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// Always performs exactly [`GaConfig::generations`] successor steps.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<GaResult, GaError> {
        let config = &self.config;
        tracing::info!(
            population_size = config.population_size,
            generations = config.generations,
            points = self.model.keys().len(),
            starting_key = self.starting_key,
            "starting genetic algorithm"
        );

        let mut population = Population::seed(
            config.population_size,
            self.starting_key,
            self.model,
            &config.initial_tour,
            config.drop_fraction,
            rng,
        )?;

        let mut history = Vec::with_capacity(config.generations + 1);
        record(0, &population, &mut history);

        let mut best_seen = match config.best_of {
            BestOf::AnyGeneration => population.best_individual().cloned(),
            BestOf::LastGeneration => None,
        };

        for generation in 1..=config.generations {
            population = Population::successor(&population, self.model, config, rng)?;
            record(generation, &population, &mut history);

            if config.best_of == BestOf::AnyGeneration {
                if let Some(candidate) = population.best_individual() {
                    let improved = best_seen
                        .as_ref()
                        .is_none_or(|seen| candidate.rank_cmp(seen) == Ordering::Greater);
                    if improved {
                        best_seen = Some(candidate.clone());
                    }
                }
            }
        }

        let best = match config.best_of {
            BestOf::LastGeneration => population.into_best()?,
            BestOf::AnyGeneration => best_seen.ok_or(GaError::EmptyPopulation)?,
        };
        let best_fitness = best.fitness().unwrap_or_else(|| best.compute_fitness(self.model));

        tracing::info!(best_fitness, "genetic algorithm finished");

        Ok(GaResult {
            best,
            best_fitness,
            generations: config.generations,
            history,
        })
    }
}

fn record(generation: usize, population: &Population, history: &mut Vec<GenerationStats>) {
    let Some(stats) = GenerationStats::of(generation, population) else {
        return;
    };
    tracing::info!(
        generation,
        best_fitness = stats.best_fitness,
        worst_fitness = stats.worst_fitness,
        average_fitness = stats.average_fitness,
        "generation evaluated"
    );
    history.push(stats);
}

// ============================================================================
// Tests
// ============================================================================
