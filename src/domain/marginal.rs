//! One-unit marginal values per block.

use super::valuation::evaluate;

/// EV of an allocation together with the EV change from adding one unit to
/// each block in turn.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalScan {
    /// EV of the allocation as given.
    pub base_ev: f64,
    /// `deltas[i]` is the EV change from one extra unit on block `i` alone.
    pub deltas: Vec<f64>,
}

impl MarginalScan {
    /// Probe every block with one extra `unit`, holding the others fixed.
    #[must_use]
    pub fn compute(opponent: &[f64], allocation: &[f64], unit: f64, fee_rate: f64) -> Self {
        let base_ev = evaluate(opponent, allocation, fee_rate).ev;

        // One scratch vector, restored by assignment so every probe starts
        // from the exact allocation bits.
        let mut probe = allocation.to_vec();
        let mut deltas = Vec::with_capacity(probe.len());
        for i in 0..probe.len() {
            let current = probe[i];
            probe[i] = current + unit;
            deltas.push(evaluate(opponent, &probe, fee_rate).ev - base_ev);
            probe[i] = current;
        }

        Self { base_ev, deltas }
    }

    /// Block with the largest delta, first one wins on ties.
    ///
    /// Returns `None` when there are no blocks or every delta is NaN.
    #[must_use]
    pub fn best(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &delta) in self.deltas.iter().enumerate() {
            if delta.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, top)| delta > top) {
                best = Some((i, delta));
            }
        }
        best
    }
}

/// EV change from adding one `unit` to each block of `allocation`.
#[must_use]
pub fn marginal_deltas(opponent: &[f64], allocation: &[f64], unit: f64, fee_rate: f64) -> Vec<f64> {
    MarginalScan::compute(opponent, allocation, unit, fee_rate).deltas
}
