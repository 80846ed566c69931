//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Durstenfeld (1964), "Algorithm 235: Random permutation"

use super::error::GaError;
use super::individual::Individual;
use crate::random::random_sublist;
use rand::Rng;

/// Selection strategy for choosing parents from the elite pool.
///
/// # Examples
///
/// ```
/// use tsp_ga::ga::Selection;
///
/// // Tournament of 5 (the default)
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Tournament(Some(5)));
///
/// // Tournament whose size must be supplied per call
/// let sel = Selection::Tournament(None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` distinct candidates, keep the best.
    ///
    /// Higher `k` means stronger selection pressure. The size carried here
    /// is the default used when a call does not supply one.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(Option<usize>),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(Some(5))
    }
}

impl Selection {
    /// Tournament with a configured sample size.
    pub fn tournament(sample_size: usize) -> Self {
        Selection::Tournament(Some(sample_size))
    }

    /// The sample size configured on the strategy, if any.
    pub fn sample_size(&self) -> Option<usize> {
        match *self {
            Selection::Tournament(k) => k,
        }
    }

    /// Picks a winner from `candidates`.
    ///
    /// `candidates` is scratch space: the references are reordered in place,
    /// the individuals themselves are untouched. An explicit `sample_size`
    /// overrides the configured one.
    ///
    /// # Errors
    /// [`GaError::MissingSampleSize`] if no non-zero size is available,
    /// [`GaError::SampleTooLarge`] if it exceeds `candidates.len()`.
    pub fn select<'a, R: Rng>(
        &self,
        candidates: &mut [&'a Individual],
        sample_size: Option<usize>,
        rng: &mut R,
    ) -> Result<&'a Individual, GaError> {
        let k = sample_size
            .or(self.sample_size())
            .filter(|&k| k > 0)
            .ok_or(GaError::MissingSampleSize)?;

        match self {
            Selection::Tournament(_) => tournament(candidates, k, rng),
        }
    }
}

fn tournament<'a, R: Rng>(
    candidates: &mut [&'a Individual],
    k: usize,
    rng: &mut R,
) -> Result<&'a Individual, GaError> {
    let available = candidates.len();
    let sample = random_sublist(candidates, k, rng).ok_or(GaError::SampleTooLarge {
        available,
        requested: k,
    })?;

    sample
        .iter()
        .copied()
        .max_by(|a, b| a.rank_cmp(b))
        .ok_or(GaError::MissingSampleSize)
}
