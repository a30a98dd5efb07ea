//! Greedy discrete allocation of a stake budget across blocks.
//!
//! The budget is cut into whole units. Each step probes every block with one
//! extra unit, commits the unit where expected value rises the most, and
//! repeats until the budget is spent, nothing improves EV beyond
//! [`MARGINAL_TOLERANCE`], or the iteration cap is hit.
//!
//! ```text
//! budget/unit ──► probe n blocks ──► best delta > tol? ──► commit unit ──┐
//!                      ▲                    │ no                         │
//!                      │                    ▼                            │
//!                      │                  stop                           │
//!                      └─────────────────────────────────────────────────┘
//! ```
//!
//! Every probe re-evaluates the full model, so one step costs `n + 1`
//! evaluations of `O(n)` each.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::grid::Allocation;
use super::marginal::MarginalScan;
use super::valuation::evaluate;

/// Marginal EV at or below this is treated as numerical noise.
pub const MARGINAL_TOLERANCE: f64 = 1e-12;

/// Configuration for the greedy allocator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocatorConfig {
    /// Size of one allocatable increment.
    pub unit: f64,
    /// Fraction of reward retained by the protocol, in `[0, 1)`.
    pub protocol_fee: f64,
    /// Maximum number of greedy steps. Defaults to the number of budget units.
    pub max_iterations: Option<usize>,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            unit: 0.001,
            protocol_fee: 0.10,
            max_iterations: None,
        }
    }
}

/// Why the allocator stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Budget or unit was not positive, or rounded to zero units.
    NoBudget,
    /// Every unit of the budget was committed.
    BudgetExhausted,
    /// No block gained more than [`MARGINAL_TOLERANCE`] from another unit.
    NoPositiveMarginal,
    /// The iteration cap was reached with budget left.
    IterationCap,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoBudget => "no budget",
            Self::BudgetExhausted => "budget exhausted",
            Self::NoPositiveMarginal => "no positive marginal EV",
            Self::IterationCap => "iteration cap reached",
        };
        f.write_str(label)
    }
}

/// Outcome of one allocator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRun {
    /// Final stake per block.
    pub allocation: Allocation,
    /// Units committed.
    pub steps: usize,
    /// Greedy iterations performed, including a final non-committing one.
    pub iterations: usize,
    /// Budget units available at the start.
    pub budget_units: u64,
    pub stop: StopReason,
    /// EV after fees of `allocation`.
    pub final_ev: f64,
}

/// Greedy marginal-EV allocator.
#[derive(Debug, Clone)]
pub struct GreedyAllocator {
    config: AllocatorConfig,
}

impl GreedyAllocator {
    #[must_use]
    pub const fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocate `budget` against `opponent` and return the final allocation.
    #[must_use]
    pub fn optimize(&self, opponent: &[f64], budget: f64) -> Allocation {
        self.run(opponent, budget).allocation
    }

    /// Allocate `budget` against `opponent`, reporting how the run ended.
    #[must_use]
    pub fn run(&self, opponent: &[f64], budget: f64) -> AllocationRun {
        let AllocatorConfig {
            unit,
            protocol_fee,
            max_iterations,
        } = self.config;

        let mut allocation = Allocation::zeros(opponent.len());
        let budget_units = budget_units(budget, unit);
        if budget_units == 0 {
            let final_ev = evaluate(opponent, allocation.as_slice(), protocol_fee).ev;
            return AllocationRun {
                allocation,
                steps: 0,
                iterations: 0,
                budget_units,
                stop: StopReason::NoBudget,
                final_ev,
            };
        }

        let max_iterations =
            max_iterations.unwrap_or_else(|| usize::try_from(budget_units).unwrap_or(usize::MAX));
        info!(
            blocks = opponent.len(),
            budget_units, max_iterations, unit, protocol_fee, "Starting greedy allocation"
        );

        let mut remaining = budget_units;
        let mut steps = 0;
        let mut iterations = 0;
        let mut settled_ev = None;

        let stop = loop {
            if remaining == 0 {
                break StopReason::BudgetExhausted;
            }
            if iterations >= max_iterations {
                break StopReason::IterationCap;
            }
            iterations += 1;

            let scan = MarginalScan::compute(opponent, allocation.as_slice(), unit, protocol_fee);
            match scan.best() {
                Some((block, delta)) if delta > MARGINAL_TOLERANCE => {
                    allocation.add_unit(block, unit);
                    remaining -= 1;
                    steps += 1;
                    debug!(step = steps, block, delta, base_ev = scan.base_ev, "Committed unit");
                }
                best => {
                    debug!(?best, base_ev = scan.base_ev, "No block improves EV");
                    settled_ev = Some(scan.base_ev);
                    break StopReason::NoPositiveMarginal;
                }
            }
        };

        let final_ev = settled_ev
            .unwrap_or_else(|| evaluate(opponent, allocation.as_slice(), protocol_fee).ev);
        info!(
            steps,
            iterations,
            %stop,
            final_ev,
            deployed = allocation.total(),
            "Greedy allocation finished"
        );

        AllocationRun {
            allocation,
            steps,
            iterations,
            budget_units,
            stop,
            final_ev,
        }
    }
}

/// Number of whole units in `budget`, rounding half to even.
///
/// Non-positive or NaN inputs give zero units.
#[must_use]
pub fn budget_units(budget: f64, unit: f64) -> u64 {
    if !(budget > 0.0 && unit > 0.0) {
        return 0;
    }
    let units = (budget / unit).round_ties_even();
    if units >= 1.0 {
        // Float-to-int casts saturate.
        units as u64
    } else {
        0
    }
}

/// Greedily allocate `budget` in steps of `unit` against `opponent`.
///
/// `max_iters` caps the number of greedy steps; it defaults to the number of
/// budget units.
#[must_use]
pub fn optimize(
    opponent: &[f64],
    budget: f64,
    unit: f64,
    fee_rate: f64,
    max_iters: Option<usize>,
) -> Allocation {
    GreedyAllocator::new(AllocatorConfig {
        unit,
        protocol_fee: fee_rate,
        max_iterations: max_iters,
    })
    .optimize(opponent, budget)
}
