//! Block grid types: opponent stakes and your allocation.
//!
//! The production round is a 5x5 grid of blocks laid out row-major, but the
//! valuation and allocation code is defined for any non-empty grid.

use serde::Serialize;

/// Number of blocks on a side of the production grid.
pub const GRID_SIDE: usize = 5;

/// Number of blocks in a production round.
pub const GRID_SIZE: usize = GRID_SIDE * GRID_SIDE;

/// Gross stake opponents have committed to each block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OpponentStakes(Vec<f64>);

impl OpponentStakes {
    /// Wrap a per-block stake vector. Entries are expected to be non-negative.
    #[must_use]
    pub const fn new(stakes: Vec<f64>) -> Self {
        Self(stakes)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combined opposing stake across every block.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl From<Vec<f64>> for OpponentStakes {
    fn from(stakes: Vec<f64>) -> Self {
        Self::new(stakes)
    }
}

/// Your gross committed amount per block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Allocation(Vec<f64>);

impl Allocation {
    /// All-zero allocation over `blocks` blocks.
    #[must_use]
    pub fn zeros(blocks: usize) -> Self {
        Self(vec![0.0; blocks])
    }

    #[must_use]
    pub const fn from_vec(amounts: Vec<f64>) -> Self {
        Self(amounts)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total amount committed across all blocks.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when nothing has been committed anywhere.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|amount| *amount == 0.0)
    }

    /// Commit one more `unit` to `block`.
    pub(crate) fn add_unit(&mut self, block: usize, unit: f64) {
        self.0[block] += unit;
    }

    /// Block indices ordered by committed amount, largest first.
    ///
    /// Equal amounts keep ascending index order.
    #[must_use]
    pub fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.0.len()).collect();
        order.sort_by(|&a, &b| self.0[b].total_cmp(&self.0[a]));
        order
    }
}

impl From<Vec<f64>> for Allocation {
    fn from(amounts: Vec<f64>) -> Self {
        Self::from_vec(amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_matches_side() {
        assert_eq!(GRID_SIZE, 25);
    }

    #[test]
    fn zeros_is_zero() {
        let alloc = Allocation::zeros(4);
        assert_eq!(alloc.len(), 4);
        assert!(alloc.is_zero());
        assert_eq!(alloc.total(), 0.0);
    }

    #[test]
    fn add_unit_touches_one_block() {
        let mut alloc = Allocation::zeros(3);
        alloc.add_unit(1, 0.5);
        alloc.add_unit(1, 0.5);
        assert_eq!(alloc.as_slice(), &[0.0, 1.0, 0.0]);
        assert!(!alloc.is_zero());
    }

    #[test]
    fn ranked_orders_descending_with_stable_ties() {
        let alloc = Allocation::from_vec(vec![1.0, 3.0, 1.0, 3.0, 0.0]);
        assert_eq!(alloc.ranked(), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn opponent_total_sums_blocks() {
        let stakes = OpponentStakes::new(vec![0.25, 0.5, 0.25]);
        assert_eq!(stakes.total(), 1.0);
        assert_eq!(stakes.len(), 3);
    }
}
