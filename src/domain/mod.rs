//! Round valuation and stake allocation.
//!
//! Pure, synchronous functions over in-memory stake vectors. Nothing here
//! validates inputs; callers hand in equal-length, non-negative vectors.

mod allocator;
mod grid;
mod marginal;
mod valuation;

pub use allocator::{
    budget_units, optimize, AllocationRun, AllocatorConfig, GreedyAllocator, StopReason,
    MARGINAL_TOLERANCE,
};
pub use grid::{Allocation, OpponentStakes, GRID_SIDE, GRID_SIZE};
pub use marginal::{marginal_deltas, MarginalScan};
pub use valuation::{evaluate, Valuation};
