//! Travel-cost lookup consumed by the GA.
//!
//! The engine never owns point data. It only asks a [`DistanceModel`] for
//! the set of valid keys, the cost between two keys, and (for greedy
//! construction) the neighbors of a key ordered by ascending cost.
//!
//! [`DistanceMatrix`] is a dense, precomputed implementation.

use std::collections::{BTreeSet, HashMap};

/// Point identifier. Keys need not be contiguous.
pub type Gene = u32;

/// Travel cost between two points. Tour costs are sums of these.
pub type Cost = u64;

/// Read-only cost model shared by every individual in a run.
///
/// Implementations must be symmetric (`cost(a, b) == cost(b, a)`) and
/// define a cost for every ordered pair of distinct valid keys.
pub trait DistanceModel: Send + Sync {
    /// All valid keys in ascending order.
    fn keys(&self) -> &[Gene];

    /// Cost of travelling from `from` to `to`.
    fn cost(&self, from: Gene, to: Gene) -> Cost;

    /// Every other key, ordered by ascending cost from `key`.
    ///
    /// Returns an empty slice for unknown keys.
    fn neighbors(&self, key: Gene) -> &[Gene];

    /// Returns `true` if `key` is a valid point.
    fn contains(&self, key: Gene) -> bool {
        self.keys().binary_search(&key).is_ok()
    }

    /// Conventional home base: the smallest key.
    fn starting_key(&self) -> Option<Gene> {
        self.keys().first().copied()
    }

    /// Smallest and largest valid key.
    fn key_range(&self) -> Option<(Gene, Gene)> {
        let keys = self.keys();
        Some((*keys.first()?, *keys.last()?))
    }
}

/// Dense `n × n` cost matrix with precomputed neighbor lists.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    keys: Vec<Gene>,
    index: HashMap<Gene, usize>,
    costs: Vec<Cost>,
    neighbors: Vec<Vec<Gene>>,
}

impl DistanceMatrix {
    /// Builds a matrix by evaluating `cost` for every ordered pair of
    /// distinct keys. Duplicate keys are ignored.
    ///
    /// Neighbor lists are sorted by cost, ties broken by the smaller key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_ga::distance::{DistanceMatrix, DistanceModel};
    ///
    /// let xs = [0i64, 3, 10];
    /// let m = DistanceMatrix::from_fn(1..=3, |a, b| {
    ///     (xs[a as usize - 1] - xs[b as usize - 1]).unsigned_abs()
    /// });
    /// assert_eq!(m.cost(1, 3), 10);
    /// assert_eq!(m.neighbors(1), &[2, 3]);
    /// ```
    pub fn from_fn<I, F>(keys: I, cost: F) -> Self
    where
        I: IntoIterator<Item = Gene>,
        F: Fn(Gene, Gene) -> Cost,
    {
        let keys: Vec<Gene> = keys.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let n = keys.len();
        let index: HashMap<Gene, usize> = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();

        let mut costs = vec![0; n * n];
        for (i, &a) in keys.iter().enumerate() {
            for (j, &b) in keys.iter().enumerate() {
                if i != j {
                    costs[i * n + j] = cost(a, b);
                }
            }
        }

        let neighbors = (0..n)
            .map(|i| {
                let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                others.sort_by_key(|&j| (costs[i * n + j], keys[j]));
                others.into_iter().map(|j| keys[j]).collect()
            })
            .collect();

        Self {
            keys,
            index,
            costs,
            neighbors,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the matrix holds no points.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl DistanceModel for DistanceMatrix {
    fn keys(&self) -> &[Gene] {
        &self.keys
    }

    /// # Panics
    /// Panics if either key is not part of the matrix.
    fn cost(&self, from: Gene, to: Gene) -> Cost {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&i), Some(&j)) => self.costs[i * self.keys.len() + j],
            _ => panic!("unknown point key in cost lookup: {from} -> {to}"),
        }
    }

    fn neighbors(&self, key: Gene) -> &[Gene] {
        match self.index.get(&key) {
            Some(&i) => &self.neighbors[i],
            None => &[],
        }
    }

    fn contains(&self, key: Gene) -> bool {
        self.index.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(Gene, i64)]) -> DistanceMatrix {
        let lookup: HashMap<Gene, i64> = points.iter().copied().collect();
        DistanceMatrix::from_fn(points.iter().map(|p| p.0), |a, b| {
            (lookup[&a] - lookup[&b]).unsigned_abs()
        })
    }

    #[test]
    fn test_keys_sorted_and_deduplicated() {
        let m = DistanceMatrix::from_fn([5, 1, 3, 1], |_, _| 1);
        assert_eq!(m.keys(), &[1, 3, 5]);
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
    }

    #[test]
    fn test_cost_symmetric_and_zero_diagonal() {
        let m = line(&[(1, 0), (2, 4), (3, 9)]);
        assert_eq!(m.cost(1, 2), 4);
        assert_eq!(m.cost(2, 1), 4);
        assert_eq!(m.cost(3, 3), 0);
    }

    #[test]
    fn test_neighbors_ascending_cost_ties_by_key() {
        let m = line(&[(1, 0), (2, 5), (3, -5), (4, 1)]);
        // From 1: key 4 at 1, then keys 2 and 3 both at 5.
        assert_eq!(m.neighbors(1), &[4, 2, 3]);
        assert!(m.neighbors(99).is_empty());
    }

    #[test]
    fn test_sparse_keys() {
        let m = line(&[(10, 0), (20, 1), (40, 2)]);
        assert!(m.contains(20));
        assert!(!m.contains(30));
        assert_eq!(m.starting_key(), Some(10));
        assert_eq!(m.key_range(), Some((10, 40)));
    }

    #[test]
    fn test_empty_matrix() {
        let m = DistanceMatrix::from_fn(std::iter::empty(), |_, _| 0);
        assert!(m.is_empty());
        assert_eq!(m.starting_key(), None);
        assert_eq!(m.key_range(), None);
    }

    #[test]
    #[should_panic(expected = "unknown point key")]
    fn test_unknown_key_panics() {
        let m = line(&[(1, 0), (2, 1)]);
        m.cost(1, 7);
    }
}
