//! Expected-value model for a single mining round.
//!
//! Exactly one block wins each round, chosen uniformly at random and
//! independently of how much is staked where. When block `i` wins, every
//! staker on it gets their stake back plus a pro-rata share of the pooled
//! stake on all other blocks:
//!
//! ```text
//! payout_i = s_i + (s_i / total_i) * (sum_j total_j - total_i)
//! ```
//!
//! The protocol fee is charged on the reward part only, never on returned
//! principal.

use serde::Serialize;

/// Expected outcome of committing an allocation against opposing stakes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Valuation {
    /// Expected value after fees: expected return after fee minus cost.
    pub ev: f64,
    /// Expected amount returned to you after the protocol fee.
    pub expected_return_after_fee: f64,
    /// Total committed up front.
    pub cost: f64,
    /// Expected share of the per-round secondary award. Diagnostic only.
    pub raw_ore_share: f64,
    /// Expected amount returned before the protocol fee.
    pub expected_return: f64,
    /// Part of the expected return that is your own stake coming back.
    pub expected_kept_stake: f64,
    pub expected_reward_before_fee: f64,
    pub expected_reward_after_fee: f64,
}

/// Value `allocation` against `opponent` under `fee_rate`.
///
/// Both slices must have the same length. Blocks with an empty pool are
/// skipped rather than divided through.
#[must_use]
pub fn evaluate(opponent: &[f64], allocation: &[f64], fee_rate: f64) -> Valuation {
    let n = opponent.len();
    debug_assert_eq!(n, allocation.len(), "stake vectors must match in length");

    let totals: Vec<f64> = opponent
        .iter()
        .zip(allocation)
        .map(|(theirs, ours)| theirs + ours)
        .collect();
    let pool: f64 = totals.iter().sum();

    let mut expected_return = 0.0;
    let mut raw_ore_share = 0.0;

    for (i, &total) in totals.iter().enumerate() {
        if total <= 0.0 {
            continue;
        }
        let stake = allocation[i];
        let share = stake / total;
        let payout = stake + share * (pool - total);
        expected_return += payout;
        raw_ore_share += share;
    }

    let blocks = n as f64;
    expected_return /= blocks;
    raw_ore_share /= blocks;

    let cost: f64 = allocation.iter().sum();
    let expected_kept_stake = cost / blocks;
    let expected_reward_before_fee = expected_return - expected_kept_stake;
    let expected_reward_after_fee = expected_reward_before_fee * (1.0 - fee_rate);
    let expected_return_after_fee = expected_kept_stake + expected_reward_after_fee;

    Valuation {
        ev: expected_return_after_fee - cost,
        expected_return_after_fee,
        cost,
        raw_ore_share,
        expected_return,
        expected_kept_stake,
        expected_reward_before_fee,
        expected_reward_after_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn zero_allocation_is_worth_nothing() {
        let v = evaluate(&[0.3, 0.4, 0.5], &[0.0, 0.0, 0.0], 0.1);
        assert_eq!(v.ev, 0.0);
        assert_eq!(v.cost, 0.0);
        assert_eq!(v.raw_ore_share, 0.0);
    }

    #[test]
    fn empty_pools_are_skipped() {
        let v = evaluate(&[0.0, 0.0], &[0.0, 0.0], 0.0);
        assert_eq!(v.expected_return, 0.0);
        assert!(v.ev.is_finite());
    }

    #[test]
    fn sole_staker_in_empty_block_loses_half_on_two_blocks() {
        let v = evaluate(&[0.0, 0.0], &[0.001, 0.0], 0.0);
        assert_eq!(v.ev, -0.0005);
        assert_eq!(v.raw_ore_share, 0.5);
    }

    #[test]
    fn sole_staker_captures_opposing_pool() {
        let v = evaluate(&[10.0, 0.0], &[0.0, 1.0], 0.0);
        assert!((v.expected_return - 5.5).abs() < EPS);
        assert!((v.expected_kept_stake - 0.5).abs() < EPS);
        assert!((v.ev - 4.5).abs() < EPS);
    }

    #[test]
    fn fee_applies_to_reward_only() {
        let v = evaluate(&[10.0, 0.0], &[0.0, 1.0], 0.1);
        assert!((v.expected_reward_before_fee - 5.0).abs() < EPS);
        assert!((v.expected_reward_after_fee - 4.5).abs() < EPS);
        assert!((v.expected_return_after_fee - 5.0).abs() < EPS);
        assert!((v.ev - 4.0).abs() < EPS);
    }

    #[test]
    fn pro_rata_share_in_contested_block() {
        // Block 0 wins: 1/4 of the 2.0 sitting on block 1, plus stake back.
        let v = evaluate(&[3.0, 2.0], &[1.0, 0.0], 0.0);
        assert!((v.expected_return - 0.75).abs() < EPS);
        assert!((v.raw_ore_share - 0.125).abs() < EPS);
        assert!((v.ev + 0.25).abs() < EPS);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let opponent = vec![0.2, 0.3];
        let allocation = vec![0.1, 0.0];
        let _ = evaluate(&opponent, &allocation, 0.1);
        assert_eq!(opponent, vec![0.2, 0.3]);
        assert_eq!(allocation, vec![0.1, 0.0]);
    }
}
