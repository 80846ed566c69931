//! Candidate tours.
//!
//! An [`Individual`] is a permutation of point keys plus the cached cost of
//! the closed tour it describes. Position 0 holds the fixed home base and is
//! never moved by mutation or by crossover of two tours sharing it.

use super::error::GaError;
use super::initial::InitialTour;
use crate::distance::{Cost, DistanceModel, Gene};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// A candidate tour.
///
/// Fitness is cached, not derived: it is `None` until computed and is
/// cleared by [`mutate`](Individual::mutate). Whoever changes the genome
/// re-evaluates it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genome: Vec<Gene>,
    fitness: Option<Cost>,
}

/// Checks `min <= max` and `start ∈ [min, max]`.
pub(crate) fn check_gene_range(min: Gene, max: Gene, start: Gene) -> Result<(), GaError> {
    if max < min {
        return Err(GaError::InvalidRange { min, max });
    }
    if start < min || start > max {
        return Err(GaError::InvalidStartingGene {
            gene: start,
            min,
            max,
        });
    }
    Ok(())
}

impl Individual {
    /// Wraps a genome as given. No permutation or key check is performed.
    pub fn new(genome: Vec<Gene>) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// Wraps a genome with an already known fitness.
    pub fn with_fitness(genome: Vec<Gene>, fitness: Cost) -> Self {
        Self {
            genome,
            fitness: Some(fitness),
        }
    }

    /// Creates a uniformly shuffled permutation of `min..=max` with `start`
    /// fixed at position 0.
    ///
    /// # Errors
    /// [`GaError::InvalidRange`] if `max < min`,
    /// [`GaError::InvalidStartingGene`] if `start` lies outside the range.
    pub fn random<R: Rng>(min: Gene, max: Gene, start: Gene, rng: &mut R) -> Result<Self, GaError> {
        check_gene_range(min, max, start)?;

        let mut rest: Vec<Gene> = (min..=max).filter(|&g| g != start).collect();
        rest.shuffle(rng);

        let mut genome = Vec::with_capacity(rest.len() + 1);
        genome.push(start);
        genome.extend(rest);
        Ok(Self::new(genome))
    }

    /// Builds a genome with `strategy` and scores it against `model`.
    pub fn from_strategy<M, R>(
        min: Gene,
        max: Gene,
        start: Gene,
        strategy: &InitialTour,
        model: &M,
        rng: &mut R,
    ) -> Result<Self, GaError>
    where
        M: DistanceModel + ?Sized,
        R: Rng,
    {
        check_gene_range(min, max, start)?;
        let genome = strategy.initialize(min, max, start, model, rng)?;
        let mut individual = Self::new(genome);
        individual.evaluate(model);
        Ok(individual)
    }

    /// The tour in visiting order.
    pub fn genome(&self) -> &[Gene] {
        &self.genome
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genome(self) -> Vec<Gene> {
        self.genome
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genome.len()
    }

    /// Returns `true` for an empty genome.
    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }

    /// Cached tour cost, `None` if not computed since the last change.
    pub fn fitness(&self) -> Option<Cost> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: Cost) {
        self.fitness = Some(fitness);
    }

    /// Cost of the closed tour: every consecutive pair plus the edge from
    /// the last gene back to the first. Does not touch the cache.
    ///
    /// # Panics
    /// Propagates the model's panic for genes it does not know, as
    /// [`DistanceMatrix`](crate::distance::DistanceMatrix) does. Genomes built
    /// by [`Individual::new`] are not checked;
    /// [`Population::from_individuals`](crate::ga::Population::from_individuals)
    /// rejects them with [`GaError::UnknownGene`].
    pub fn compute_fitness<M: DistanceModel + ?Sized>(&self, model: &M) -> Cost {
        if self.genome.len() < 2 {
            return 0;
        }
        let open: Cost = self
            .genome
            .windows(2)
            .map(|pair| model.cost(pair[0], pair[1]))
            .sum();
        let first = self.genome[0];
        let last = self.genome[self.genome.len() - 1];
        open + model.cost(last, first)
    }

    /// Computes the tour cost and caches it.
    ///
    /// # Panics
    /// Same as [`compute_fitness`](Individual::compute_fitness).
    pub fn evaluate<M: DistanceModel + ?Sized>(&mut self, model: &M) -> Cost {
        let fitness = self.compute_fitness(model);
        self.fitness = Some(fitness);
        fitness
    }

    /// Swaps two genes drawn uniformly from positions `1..len`.
    ///
    /// The starting gene never moves. Clears the cached fitness; genomes
    /// shorter than 3 genes have nothing to swap and are left untouched.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) {
        let n = self.genome.len();
        if n < 3 {
            return;
        }
        let i = rng.random_range(1..n);
        let j = rng.random_range(1..n);
        self.genome.swap(i, j);
        self.fitness = None;
    }

    /// Ranking used by selection: lower cost compares as `Greater`.
    ///
    /// Equal costs are `Equal`. An unevaluated individual ranks below any
    /// evaluated one, so taking the maximum yields the cheapest tour.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self.fitness, other.fitness) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::test_support::line_model;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn sorted(genome: &[Gene]) -> Vec<Gene> {
        let mut v = genome.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_random_genome_size() {
        let mut rng = create_rng(42);
        let ind = Individual::random(1, 137, 1, &mut rng).unwrap();
        assert_eq!(ind.len(), 137);
        assert_eq!(ind.genome()[0], 1);
        assert_eq!(ind.fitness(), None);
    }

    #[test]
    fn test_random_invalid_range() {
        let mut rng = create_rng(42);
        let err = Individual::random(10, 5, 7, &mut rng).unwrap_err();
        assert_eq!(err, GaError::InvalidRange { min: 10, max: 5 });
    }

    #[test]
    fn test_random_invalid_starting_gene() {
        let mut rng = create_rng(42);
        let err = Individual::random(1, 5, 6, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GaError::InvalidStartingGene {
                gene: 6,
                min: 1,
                max: 5
            }
        );
    }

    #[test]
    fn test_single_gene_range() {
        let mut rng = create_rng(1);
        let ind = Individual::random(4, 4, 4, &mut rng).unwrap();
        assert_eq!(ind.genome(), &[4]);
    }

    #[test]
    fn test_compute_fitness_includes_closing_edge() {
        let model = line_model(4);
        // 1 -> 3 -> 2 -> 4 -> back to 1: 20 + 10 + 20 + 30
        let ind = Individual::new(vec![1, 3, 2, 4]);
        assert_eq!(ind.compute_fitness(&model), 80);
        assert_eq!(ind.fitness(), None, "compute_fitness must not cache");
    }

    #[test]
    fn test_evaluate_caches() {
        let model = line_model(4);
        let mut ind = Individual::new(vec![1, 2, 3, 4]);
        assert_eq!(ind.evaluate(&model), 60);
        assert_eq!(ind.fitness(), Some(60));
    }

    #[test]
    fn test_fitness_rotation_invariant() {
        let model = line_model(6);
        let genome = vec![1, 4, 2, 6, 3, 5];
        let base = Individual::new(genome.clone()).compute_fitness(&model);
        for shift in 1..genome.len() {
            let mut rotated = genome.clone();
            rotated.rotate_left(shift);
            assert_eq!(Individual::new(rotated).compute_fitness(&model), base);
        }
    }

    #[test]
    fn test_from_strategy_scores_immediately() {
        let model = line_model(8);
        let mut rng = create_rng(5);
        let ind =
            Individual::from_strategy(1, 8, 1, &InitialTour::Random, &model, &mut rng).unwrap();
        assert_eq!(ind.fitness(), Some(ind.compute_fitness(&model)));
        assert_eq!(sorted(ind.genome()), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_strategy_validates_range() {
        let model = line_model(8);
        let mut rng = create_rng(5);
        let err = Individual::from_strategy(1, 8, 0, &InitialTour::Random, &model, &mut rng)
            .unwrap_err();
        assert!(matches!(err, GaError::InvalidStartingGene { gene: 0, .. }));
    }

    #[test]
    fn test_mutate_clears_fitness() {
        let model = line_model(6);
        let mut rng = create_rng(9);
        let mut ind = Individual::new(vec![1, 2, 3, 4, 5, 6]);
        ind.evaluate(&model);
        ind.mutate(&mut rng);
        assert_eq!(ind.fitness(), None);
    }

    #[test]
    fn test_mutate_short_genomes_untouched() {
        let mut rng = create_rng(9);
        let mut ind = Individual::with_fitness(vec![1, 2], 20);
        ind.mutate(&mut rng);
        assert_eq!(ind.genome(), &[1, 2]);
        assert_eq!(ind.fitness(), Some(20));
    }

    #[test]
    fn test_rank_cmp() {
        let cheap = Individual::with_fitness(vec![], 100);
        let dear = Individual::with_fitness(vec![], 500);
        let same = Individual::with_fitness(vec![1], 100);
        let unknown = Individual::new(vec![]);

        assert_eq!(cheap.rank_cmp(&dear), Ordering::Greater);
        assert_eq!(dear.rank_cmp(&cheap), Ordering::Less);
        assert_eq!(cheap.rank_cmp(&same), Ordering::Equal);
        assert_eq!(unknown.rank_cmp(&dear), Ordering::Less);

        let all = [dear.clone(), cheap.clone(), unknown];
        let best = all.iter().max_by(|a, b| a.rank_cmp(b)).unwrap();
        assert_eq!(best.fitness(), Some(100));
    }

    proptest! {
        #[test]
        fn prop_random_is_permutation_with_fixed_start(
            min in 0u32..1000,
            span in 0u32..64,
            pick in any::<u32>(),
            seed in any::<u64>(),
        ) {
            let max = min + span;
            let start = min + pick % (span + 1);
            let mut rng = create_rng(seed);
            let ind = Individual::random(min, max, start, &mut rng).unwrap();

            prop_assert_eq!(ind.genome()[0], start);
            prop_assert_eq!(sorted(ind.genome()), (min..=max).collect::<Vec<_>>());
        }

        #[test]
        fn prop_mutate_keeps_start_and_genes(
            len in 2u32..40,
            seed in any::<u64>(),
            rounds in 1usize..20,
        ) {
            let mut rng = create_rng(seed);
            let mut ind = Individual::random(1, len, 1, &mut rng).unwrap();
            let before = sorted(ind.genome());
            for _ in 0..rounds {
                ind.mutate(&mut rng);
                prop_assert_eq!(ind.genome()[0], 1);
            }
            prop_assert_eq!(sorted(ind.genome()), before);
        }
    }
}
