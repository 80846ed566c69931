//! Generations of tours.
//!
//! A [`Population`] is built either as generation 0 from an
//! [`InitialTour`] strategy, or as the successor of a previous generation
//! by breeding from its elite pool. Every constructor finishes by
//! evaluating statistics and ranking the elite pool.

use super::config::{elite_size, GaConfig};
use super::error::GaError;
use super::individual::Individual;
use super::initial::InitialTour;
use crate::distance::{Cost, DistanceModel, Gene};
use crate::random::create_rng;
use rand::Rng;
use std::cmp::Ordering;

/// One generation.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    best: Option<usize>,
    worst: Option<usize>,
    average_fitness: Option<Cost>,
    /// Indices into `individuals`, best first, worst tail removed.
    elite: Vec<usize>,
}

impl Population {
    /// Builds generation 0: `size` tours from `initial_tour`, all starting
    /// at `starting_key` and scored against `model`.
    ///
    /// # Errors
    /// [`GaError::InvalidPopulationSize`] for `size == 0`,
    /// [`GaError::EmptyDistanceModel`], [`GaError::InvalidDropFraction`],
    /// and any error of [`InitialTour::initialize`].
    pub fn seed<M, R>(
        size: usize,
        starting_key: Gene,
        model: &M,
        initial_tour: &InitialTour,
        drop_fraction: f64,
        rng: &mut R,
    ) -> Result<Self, GaError>
    where
        M: DistanceModel + ?Sized,
        R: Rng,
    {
        if size == 0 {
            return Err(GaError::InvalidPopulationSize);
        }
        check_drop_fraction(drop_fraction)?;
        let (min, max) = model.key_range().ok_or(GaError::EmptyDistanceModel)?;

        let individuals = (0..size)
            .map(|_| Individual::from_strategy(min, max, starting_key, initial_tour, model, rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::ranked(individuals, drop_fraction))
    }

    /// Wraps caller-supplied individuals. Any without a cached fitness are
    /// scored against `model` first.
    ///
    /// # Errors
    /// [`GaError::InvalidDropFraction`], or [`GaError::UnknownGene`] for the
    /// first gene that is not a point of `model`.
    pub fn from_individuals<M>(
        mut individuals: Vec<Individual>,
        model: &M,
        drop_fraction: f64,
    ) -> Result<Self, GaError>
    where
        M: DistanceModel + ?Sized,
    {
        check_drop_fraction(drop_fraction)?;
        if let Some(&gene) = individuals
            .iter()
            .flat_map(|i| i.genome())
            .find(|&&g| !model.contains(g))
        {
            return Err(GaError::UnknownGene { gene });
        }
        for individual in individuals.iter_mut().filter(|i| i.fitness().is_none()) {
            individual.evaluate(model);
        }
        Ok(Self::ranked(individuals, drop_fraction))
    }

    /// Breeds the next generation from `previous`'s elite pool.
    ///
    /// For each child: select a parent; with `crossover_probability`
    /// select a second parent and recombine; with `mutation_probability`
    /// mutate; score. The new generation has exactly `previous.len()`
    /// members.
    ///
    /// Every child draws from its own generator seeded from `rng`, so the
    /// parallel path produces the same generation as the sequential one.
    pub fn successor<M, R>(
        previous: &Population,
        model: &M,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<Self, GaError>
    where
        M: DistanceModel + ?Sized,
        R: Rng,
    {
        check_drop_fraction(config.drop_fraction)?;

        let elite: Vec<&Individual> = previous.elite().collect();
        let seeds: Vec<u64> = (0..previous.len()).map(|_| rng.random()).collect();

        let individuals = build_children(&seeds, config.parallel, |seed| {
            breed_child(&elite, model, config, &mut create_rng(seed))
        })?;

        Ok(Self::ranked(individuals, config.drop_fraction))
    }

    fn ranked(individuals: Vec<Individual>, drop_fraction: f64) -> Self {
        let mut population = Self {
            individuals,
            best: None,
            worst: None,
            average_fitness: None,
            elite: Vec::new(),
        };
        population.evaluate();
        population.rank_elite(drop_fraction);
        population
    }

    /// Single scan for best, worst and the floor of the mean fitness.
    /// Ties keep the first individual encountered.
    fn evaluate(&mut self) {
        let Some(first) = self.individuals.first() else {
            tracing::debug!("empty population, statistics left unset");
            return;
        };

        let mut best = (0, first);
        let mut worst = (0, first);
        let mut sum: u128 = 0;
        for (i, individual) in self.individuals.iter().enumerate() {
            if individual.rank_cmp(best.1) == Ordering::Greater {
                best = (i, individual);
            }
            if individual.rank_cmp(worst.1) == Ordering::Less {
                worst = (i, individual);
            }
            // members are scored before they are inserted
            sum += u128::from(individual.fitness().unwrap_or_default());
        }

        self.best = Some(best.0);
        self.worst = Some(worst.0);
        self.average_fitness = Some((sum / self.individuals.len() as u128) as Cost);
    }

    /// Drops the worst `floor(drop_fraction * len)` members and keeps the
    /// rest best first. Among members tied at the cut, the earlier one is
    /// dropped, consistent with the worst-individual scan.
    fn rank_elite(&mut self, drop_fraction: f64) {
        let individuals = &self.individuals;
        let mut order: Vec<usize> = (0..individuals.len()).collect();
        // worst first, stable
        order.sort_by(|&a, &b| individuals[a].rank_cmp(&individuals[b]));
        let dropped = individuals.len() - elite_size(individuals.len(), drop_fraction);
        order.drain(..dropped);
        order.reverse();

        tracing::debug!(
            elite = order.len(),
            dropped = individuals.len() - order.len(),
            "elite pool ranked"
        );
        self.elite = order;
    }

    /// All members, in insertion order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population has no members.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn best_individual(&self) -> Option<&Individual> {
        self.best.map(|i| &self.individuals[i])
    }

    pub fn worst_individual(&self) -> Option<&Individual> {
        self.worst.map(|i| &self.individuals[i])
    }

    pub fn best_fitness(&self) -> Option<Cost> {
        self.best_individual().and_then(Individual::fitness)
    }

    pub fn worst_fitness(&self) -> Option<Cost> {
        self.worst_individual().and_then(Individual::fitness)
    }

    /// Rounded-down mean fitness, for diagnostics.
    pub fn average_fitness(&self) -> Option<Cost> {
        self.average_fitness
    }

    /// Breeding stock: members ordered best first, worst fraction excluded.
    pub fn elite(&self) -> impl Iterator<Item = &Individual> + '_ {
        self.elite.iter().map(move |&i| &self.individuals[i])
    }

    /// Number of members in the elite pool.
    pub fn elite_len(&self) -> usize {
        self.elite.len()
    }

    /// Consumes the population, returning its best member.
    ///
    /// # Errors
    /// [`GaError::EmptyPopulation`] if there are no members.
    pub fn into_best(mut self) -> Result<Individual, GaError> {
        let best = self.best.ok_or(GaError::EmptyPopulation)?;
        Ok(self.individuals.swap_remove(best))
    }
}

fn check_drop_fraction(drop_fraction: f64) -> Result<(), GaError> {
    if (0.0..1.0).contains(&drop_fraction) {
        Ok(())
    } else {
        Err(GaError::InvalidDropFraction(drop_fraction))
    }
}

fn breed_child<M, R>(
    elite: &[&Individual],
    model: &M,
    config: &GaConfig,
    rng: &mut R,
) -> Result<Individual, GaError>
where
    M: DistanceModel + ?Sized,
    R: Rng,
{
    let mut pool = elite.to_vec();

    let mut child = config.selection.select(&mut pool, None, rng)?.clone();

    if config.crossover_probability > rng.random::<f64>() {
        let mate = config.selection.select(&mut pool, None, rng)?;
        child = config.crossover.perform(&child, mate, None, rng)?;
    }

    if config.mutation_probability > rng.random::<f64>() {
        child.mutate(rng);
    }

    child.evaluate(model);
    Ok(child)
}

#[cfg(feature = "parallel")]
fn build_children<F>(seeds: &[u64], parallel: bool, breed: F) -> Result<Vec<Individual>, GaError>
where
    F: Fn(u64) -> Result<Individual, GaError> + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        seeds.par_iter().map(|&seed| breed(seed)).collect()
    } else {
        seeds.iter().map(|&seed| breed(seed)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn build_children<F>(seeds: &[u64], _parallel: bool, breed: F) -> Result<Vec<Individual>, GaError>
where
    F: Fn(u64) -> Result<Individual, GaError>,
{
    seeds.iter().map(|&seed| breed(seed)).collect()
}
