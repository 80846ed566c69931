//! Recombination of two parent tours.
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use super::error::GaError;
use super::individual::Individual;
use rand::Rng;

/// Crossover operator producing one child from two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Partially Mapped Crossover (PMX), single-breakpoint variant.
    ///
    /// The child's first `breakpoint` genes equal parent2's; each displaced
    /// gene of parent1 is relocated to where the incoming gene used to be,
    /// so the child stays a permutation.
    #[default]
    PartiallyMapped,
}

impl Crossover {
    /// Recombines two parents into an unevaluated child.
    ///
    /// When `breakpoint` is `None` it is drawn uniformly from `0..=len-2`.
    ///
    /// # Errors
    /// [`GaError::ParentLengthMismatch`] if the genomes differ in length,
    /// [`GaError::BreakpointOutOfRange`] if `breakpoint > len - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_ga::ga::{Crossover, Individual};
    /// use tsp_ga::random::create_rng;
    ///
    /// let p1 = Individual::new(vec![2, 4, 3, 1, 6, 5]);
    /// let p2 = Individual::new(vec![4, 6, 5, 3, 1, 2]);
    /// let child = Crossover::PartiallyMapped
    ///     .perform(&p1, &p2, Some(3), &mut create_rng(0))
    ///     .unwrap();
    /// assert_eq!(child.genome(), &[4, 6, 5, 1, 2, 3]);
    /// ```
    pub fn perform<R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        breakpoint: Option<usize>,
        rng: &mut R,
    ) -> Result<Individual, GaError> {
        let n = parent1.len();
        if parent2.len() != n {
            return Err(GaError::ParentLengthMismatch {
                left: n,
                right: parent2.len(),
            });
        }

        let breakpoint = match breakpoint {
            Some(b) => b,
            None if n >= 2 => rng.random_range(0..n - 1),
            None => 0,
        };
        let max = n.saturating_sub(1);
        if breakpoint > max {
            return Err(GaError::BreakpointOutOfRange { breakpoint, max });
        }

        match self {
            Crossover::PartiallyMapped => Ok(Individual::new(pmx(
                parent1.genome(),
                parent2.genome(),
                breakpoint,
            ))),
        }
    }
}

fn pmx<G: Copy + PartialEq>(template: &[G], donor: &[G], breakpoint: usize) -> Vec<G> {
    let mut child = template.to_vec();
    for i in 0..breakpoint {
        let incoming = donor[i];
        // Positions before i already match the donor, so search from i on.
        if let Some(offset) = child[i..].iter().position(|&g| g == incoming) {
            child.swap(i, i + offset);
        }
    }
    child
}
