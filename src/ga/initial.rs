//! Initial tour construction.
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"
//! - Hart & Shogan (1987), "Semi-greedy heuristics: An empirical study"

use super::error::GaError;
use super::individual::check_gene_range;
use crate::distance::{DistanceModel, Gene};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

/// Strategy for building the genomes of generation 0.
///
/// # Examples
///
/// ```
/// use tsp_ga::ga::InitialTour;
///
/// let uniform = InitialTour::Random;
/// let grasp = InitialTour::GreedyRandomized { rcl_size: 2 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialTour {
    /// Uniform shuffle of every valid key.
    #[default]
    Random,

    /// Semi-greedy nearest-neighbor construction.
    ///
    /// At each step the next gene is drawn uniformly from the `rcl_size`
    /// cheapest not-yet-visited neighbors of the current gene.
    /// `rcl_size = 1` degenerates to plain nearest neighbor.
    ///
    /// Each step rescans the neighbor list from the start, skipping visited
    /// keys, so construction is O(n²) per tour in the worst case.
    GreedyRandomized { rcl_size: usize },
}

impl InitialTour {
    /// Builds a genome over the model's keys in `[min, max]`, starting at `start`.
    ///
    /// # Errors
    /// [`GaError::InvalidRange`], [`GaError::InvalidStartingGene`] (also when
    /// `start` is not a model key) and, for the greedy variant,
    /// [`GaError::InvalidRclSize`] or [`GaError::IncompleteNeighbors`] when a
    /// neighbor list runs out before every key is placed.
    pub fn initialize<M, R>(
        &self,
        min: Gene,
        max: Gene,
        start: Gene,
        model: &M,
        rng: &mut R,
    ) -> Result<Vec<Gene>, GaError>
    where
        M: DistanceModel + ?Sized,
        R: Rng,
    {
        check_gene_range(min, max, start)?;
        if !model.contains(start) {
            return Err(GaError::InvalidStartingGene {
                gene: start,
                min,
                max,
            });
        }

        match *self {
            InitialTour::Random => Ok(random_tour(min, max, start, model, rng)),
            InitialTour::GreedyRandomized { rcl_size } => {
                if rcl_size == 0 {
                    return Err(GaError::InvalidRclSize);
                }
                greedy_randomized_tour(min, max, start, rcl_size, model, rng)
            }
        }
    }
}

fn random_tour<M, R>(min: Gene, max: Gene, start: Gene, model: &M, rng: &mut R) -> Vec<Gene>
where
    M: DistanceModel + ?Sized,
    R: Rng,
{
    let mut genome: Vec<Gene> = model
        .keys()
        .iter()
        .copied()
        .filter(|&k| (min..=max).contains(&k))
        .collect();
    genome.shuffle(rng);

    // start is a model key in range, so it is present
    if let Some(pos) = genome.iter().position(|&g| g == start) {
        genome.swap(0, pos);
    }
    genome
}

fn greedy_randomized_tour<M, R>(
    min: Gene,
    max: Gene,
    start: Gene,
    rcl_size: usize,
    model: &M,
    rng: &mut R,
) -> Result<Vec<Gene>, GaError>
where
    M: DistanceModel + ?Sized,
    R: Rng,
{
    let total = model
        .keys()
        .iter()
        .filter(|&&k| (min..=max).contains(&k))
        .count();

    let mut genome = Vec::with_capacity(total);
    let mut visited = HashSet::with_capacity(total);
    genome.push(start);
    visited.insert(start);

    let mut current = start;
    let mut rcl = Vec::with_capacity(rcl_size);
    while genome.len() < total {
        rcl.clear();
        rcl.extend(
            model
                .neighbors(current)
                .iter()
                .copied()
                .filter(|&k| (min..=max).contains(&k) && !visited.contains(&k))
                .take(rcl_size),
        );

        let Some(&next) = rcl.choose(rng) else {
            return Err(GaError::IncompleteNeighbors { gene: current });
        };
        genome.push(next);
        visited.insert(next);
        current = next;
    }

    Ok(genome)
}
