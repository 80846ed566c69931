//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::crossover::Crossover;
use super::error::GaError;
use super::initial::InitialTour;
use super::selection::Selection;
use crate::distance::Gene;

/// Which individual a run reports as its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BestOf {
    /// Best individual of the final generation only.
    ///
    /// Later generations are biased toward strong tours by the elite pool,
    /// but nothing guarantees the final best is the best ever seen.
    #[default]
    LastGeneration,

    /// Best individual observed in any generation, including generation 0.
    AnyGeneration,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::ga::{GaConfig, InitialTour, Selection};
///
/// let config = GaConfig::new(300, 500, 0.2, 0.5)
///     .with_selection(Selection::tournament(5))
///     .with_initial_tour(InitialTour::GreedyRandomized { rcl_size: 2 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of successor generations built after generation 0.
    ///
    /// A run always performs exactly this many steps; there is no early
    /// stopping.
    pub generations: usize,

    /// Probability of mutating a child (0.0–1.0).
    pub mutation_probability: f64,

    /// Probability of recombining a child with a second parent (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_probability: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Construction of generation 0.
    pub initial_tour: InitialTour,

    /// Fraction of each generation, taken from the worst end, excluded from
    /// breeding (0.0 inclusive – 1.0 exclusive).
    pub drop_fraction: f64,

    /// Home base of every tour. `None` uses the model's smallest key.
    pub starting_key: Option<Gene>,

    /// Which individual the run returns.
    pub best_of: BestOf,

    /// Whether to build children in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way for the same seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_probability: 0.1,
            crossover_probability: 0.9,
            selection: Selection::default(),
            crossover: Crossover::default(),
            initial_tour: InitialTour::default(),
            drop_fraction: 0.1,
            starting_key: None,
            best_of: BestOf::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Configuration with the four core parameters and default strategies.
    pub fn new(
        population_size: usize,
        generations: usize,
        mutation_probability: f64,
        crossover_probability: f64,
    ) -> Self {
        Self {
            population_size,
            generations,
            mutation_probability,
            crossover_probability,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation probability. Not clamped; see [`validate`](Self::validate).
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the crossover probability. Not clamped; see [`validate`](Self::validate).
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::tournament(k))
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the initial tour strategy.
    pub fn with_initial_tour(mut self, initial_tour: InitialTour) -> Self {
        self.initial_tour = initial_tour;
        self
    }

    /// Sets the fraction of worst individuals excluded from breeding.
    pub fn with_drop_fraction(mut self, fraction: f64) -> Self {
        self.drop_fraction = fraction;
        self
    }

    /// Sets the home base of every tour.
    pub fn with_starting_key(mut self, key: Gene) -> Self {
        self.starting_key = Some(key);
        self
    }

    /// Sets which individual the run returns.
    pub fn with_best_of(mut self, best_of: BestOf) -> Self {
        self.best_of = best_of;
        self
    }

    /// Enables or disables parallel child construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of individuals that remain in the elite pool of a full
    /// generation.
    pub fn elite_size(&self) -> usize {
        elite_size(self.population_size, self.drop_fraction)
    }

    /// Validates the configuration.
    ///
    /// Checks are ordered so the first failing parameter is reported.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::InvalidPopulationSize);
        }
        if self.generations == 0 {
            return Err(GaError::InvalidGenerationCount);
        }
        check_probability("mutation", self.mutation_probability)?;
        check_probability("crossover", self.crossover_probability)?;
        if !(0.0..1.0).contains(&self.drop_fraction) {
            return Err(GaError::InvalidDropFraction(self.drop_fraction));
        }
        if let InitialTour::GreedyRandomized { rcl_size: 0 } = self.initial_tour {
            return Err(GaError::InvalidRclSize);
        }
        // Breeding never supplies a per-call size, so the strategy must.
        let k = self
            .selection
            .sample_size()
            .filter(|&k| k > 0)
            .ok_or(GaError::MissingSampleSize)?;
        let available = self.elite_size();
        if k > available {
            return Err(GaError::SampleTooLarge {
                available,
                requested: k,
            });
        }
        Ok(())
    }
}

/// `len` minus the dropped tail, `floor(drop_fraction * len)`.
pub(crate) fn elite_size(len: usize, drop_fraction: f64) -> usize {
    let dropped = (drop_fraction * len as f64) as usize;
    len - dropped.min(len)
}

fn check_probability(name: &'static str, value: f64) -> Result<(), GaError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 500);
        assert_eq!(config.selection, Selection::Tournament(Some(5)));
        assert_eq!(config.crossover, Crossover::PartiallyMapped);
        assert_eq!(config.initial_tour, InitialTour::Random);
        assert_eq!(config.best_of, BestOf::LastGeneration);
        assert!((config.mutation_probability - 0.1).abs() < 1e-10);
        assert!((config.crossover_probability - 0.9).abs() < 1e-10);
        assert!((config.drop_fraction - 0.1).abs() < 1e-10);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert!(config.starting_key.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::new(300, 500, 0.2, 0.5)
            .with_tournament_size(4)
            .with_initial_tour(InitialTour::GreedyRandomized { rcl_size: 2 })
            .with_drop_fraction(0.2)
            .with_starting_key(3)
            .with_best_of(BestOf::AnyGeneration)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 300);
        assert_eq!(config.generations, 500);
        assert_eq!(config.selection, Selection::Tournament(Some(4)));
        assert_eq!(
            config.initial_tour,
            InitialTour::GreedyRandomized { rcl_size: 2 }
        );
        assert!((config.mutation_probability - 0.2).abs() < 1e-10);
        assert!((config.crossover_probability - 0.5).abs() < 1e-10);
        assert!((config.drop_fraction - 0.2).abs() < 1e-10);
        assert_eq!(config.starting_key, Some(3));
        assert_eq!(config.best_of, BestOf::AnyGeneration);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_population() {
        let config = GaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(GaError::InvalidPopulationSize));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_generations(0);
        assert_eq!(config.validate(), Err(GaError::InvalidGenerationCount));
    }

    #[test]
    fn test_validate_probabilities() {
        let config = GaConfig::new(300, 100, 6.0, 0.1);
        assert_eq!(
            config.validate(),
            Err(GaError::InvalidProbability {
                name: "mutation",
                value: 6.0
            })
        );

        let config = GaConfig::new(300, 100, 0.1, -0.5);
        assert!(matches!(
            config.validate(),
            Err(GaError::InvalidProbability {
                name: "crossover",
                ..
            })
        ));

        let config = GaConfig::new(300, 100, f64::NAN, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        assert!(GaConfig::new(10, 1, 0.0, 1.0).validate().is_ok());
        assert!(GaConfig::new(10, 1, 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_drop_fraction() {
        let config = GaConfig::default().with_drop_fraction(1.0);
        assert_eq!(config.validate(), Err(GaError::InvalidDropFraction(1.0)));
        let config = GaConfig::default().with_drop_fraction(-0.1);
        assert!(config.validate().is_err());
        let config = GaConfig::default().with_drop_fraction(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rcl_size() {
        let config =
            GaConfig::default().with_initial_tour(InitialTour::GreedyRandomized { rcl_size: 0 });
        assert_eq!(config.validate(), Err(GaError::InvalidRclSize));
    }

    #[test]
    fn test_validate_tournament_fits_elite_pool() {
        // 4 individuals, 10% dropped -> floor(0.4) = 0 dropped, elite of 4
        let config = GaConfig::new(4, 10, 0.1, 0.9).with_tournament_size(5);
        assert_eq!(
            config.validate(),
            Err(GaError::SampleTooLarge {
                available: 4,
                requested: 5
            })
        );
        assert!(config.with_tournament_size(4).validate().is_ok());
    }

    #[test]
    fn test_validate_tournament_without_size() {
        let config = GaConfig::new(10, 3, 0.1, 0.5).with_selection(Selection::Tournament(None));
        assert_eq!(config.validate(), Err(GaError::MissingSampleSize));

        let config = GaConfig::new(10, 3, 0.1, 0.5).with_tournament_size(0);
        assert_eq!(config.validate(), Err(GaError::MissingSampleSize));
    }

    #[test]
    fn test_elite_size() {
        assert_eq!(elite_size(100, 0.1), 90);
        assert_eq!(elite_size(15, 0.1), 14);
        assert_eq!(elite_size(9, 0.1), 9);
        assert_eq!(elite_size(0, 0.1), 0);
        assert_eq!(GaConfig::new(300, 1, 0.1, 0.1).elite_size(), 270);
    }
}
