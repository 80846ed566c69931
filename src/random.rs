//! Random number helpers shared by the GA components.
//!
//! Every operation that needs randomness takes an explicit `&mut impl Rng`.
//! [`create_rng`] is the single place where a seeded generator is built, so
//! a fixed seed reproduces a run generation by generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Picks `count` distinct elements uniformly at random and returns them as
/// the trailing sub-slice of `items`.
///
/// Uses a partial Fisher–Yates (Durstenfeld) shuffle: walking from the end
/// backward for `count` steps, each position is swapped with a uniformly
/// chosen position at or before it. Only `count` swaps are performed.
///
/// Returns `None` when `count > items.len()`.
pub fn random_sublist<'s, T, R: Rng>(
    items: &'s mut [T],
    count: usize,
    rng: &mut R,
) -> Option<&'s mut [T]> {
    let n = items.len();
    if count > n {
        return None;
    }

    for i in (n - count..n).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }

    Some(&mut items[n - count..])
}
