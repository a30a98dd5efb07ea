//! Human-readable and JSON rendering of grids, allocations and marginals.

use serde_json::{json, Value};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{Allocation, AllocationRun, Valuation, GRID_SIDE, GRID_SIZE};

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "Block")]
    block: String,
    #[tabled(rename = "Row/Col")]
    position: String,
    #[tabled(rename = "Allocated")]
    amount: String,
}

#[derive(Tabled)]
struct MarginalRow {
    #[tabled(rename = "Block")]
    block: String,
    #[tabled(rename = "Marginal EV")]
    delta: String,
}

/// Render per-block values as a 5x5 table, or one row for other grid sizes.
#[must_use]
pub fn grid_table(values: &[f64], decimals: usize) -> String {
    let mut builder = Builder::default();
    let width = if values.len() == GRID_SIZE {
        GRID_SIDE
    } else {
        values.len().max(1)
    };

    let mut header = vec![String::new()];
    header.extend((0..width).map(|col| col.to_string()));
    builder.push_record(header);

    for (row, chunk) in values.chunks(width).enumerate() {
        let mut record = vec![row.to_string()];
        record.extend(chunk.iter().map(|v| format!("{v:.decimals$}")));
        builder.push_record(record);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Label for a block index, e.g. `#07`.
#[must_use]
pub fn block_label(block: usize) -> String {
    format!("#{block:02}")
}

/// The `top` blocks with the most stake, as a table.
#[must_use]
pub fn top_allocations_table(allocation: &Allocation, top: usize) -> String {
    let values = allocation.as_slice();
    let rows: Vec<TopRow> = allocation
        .ranked()
        .into_iter()
        .take(top)
        .map(|block| TopRow {
            block: block_label(block),
            position: format!("{}/{}", block / GRID_SIDE, block % GRID_SIDE),
            amount: format!("{:.6}", values[block]),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-unit marginal EV per block, as a table.
#[must_use]
pub fn marginal_table(deltas: &[f64]) -> String {
    let rows: Vec<MarginalRow> = deltas
        .iter()
        .enumerate()
        .map(|(block, &delta)| MarginalRow {
            block: block_label(block),
            delta: output::signed(delta, format!("{delta:+.10}")),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print the valuation fields of an allocation.
pub fn print_valuation(valuation: &Valuation) {
    output::field("Total deployed", format!("{:.6}", valuation.cost));
    output::field(
        "Expected return after fee",
        format!("{:.6}", valuation.expected_return_after_fee),
    );
    output::field(
        "Expected EV after fees",
        output::signed(valuation.ev, format!("{:.8}", valuation.ev)),
    );
    output::field("Raw ore share", format!("{:.6}", valuation.raw_ore_share));
    if output::verbosity() > 0 {
        output::field("Expected return", format!("{:.8}", valuation.expected_return));
        output::field(
            "Expected kept stake",
            format!("{:.8}", valuation.expected_kept_stake),
        );
        output::field(
            "Reward before fee",
            format!("{:.8}", valuation.expected_reward_before_fee),
        );
        output::field(
            "Reward after fee",
            format!("{:.8}", valuation.expected_reward_after_fee),
        );
    }
}

/// Comma-separated amounts, as accepted back by `--allocation`.
#[must_use]
pub fn allocation_list(allocation: &Allocation) -> String {
    allocation
        .as_slice()
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn valuation_json(valuation: &Valuation) -> Value {
    serde_json::to_value(valuation).unwrap_or(Value::Null)
}

/// JSON document for the `optimize` command.
#[must_use]
pub fn optimize_json(
    opponent: &[f64],
    budget: f64,
    unit: f64,
    protocol_fee: f64,
    run: &AllocationRun,
    valuation: &Valuation,
    deltas: &[f64],
) -> Value {
    json!({
        "command": "optimize",
        "opponent": opponent,
        "budget": budget,
        "unit": unit,
        "protocol_fee": protocol_fee,
        "allocation": run.allocation,
        "steps": run.steps,
        "iterations": run.iterations,
        "budget_units": run.budget_units,
        "stop": run.stop,
        "valuation": valuation_json(valuation),
        "marginal": deltas,
    })
}

/// JSON document for the `evaluate` command.
#[must_use]
pub fn evaluate_json(
    opponent: &[f64],
    allocation: &Allocation,
    unit: f64,
    protocol_fee: f64,
    valuation: &Valuation,
    deltas: &[f64],
) -> Value {
    json!({
        "command": "evaluate",
        "opponent": opponent,
        "allocation": allocation,
        "unit": unit,
        "protocol_fee": protocol_fee,
        "valuation": valuation_json(valuation),
        "marginal": deltas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_table_has_five_rows_for_full_grid() {
        let values: Vec<f64> = (0..GRID_SIZE).map(|i| i as f64).collect();
        let table = grid_table(&values, 2);
        assert!(table.contains("24.00"));
        assert!(table.contains("0.00"));
        // header + 5 data rows
        let data_lines = table.lines().filter(|l| l.contains(".00")).count();
        assert_eq!(data_lines, GRID_SIDE);
    }

    #[test]
    fn grid_table_handles_small_grid() {
        let table = grid_table(&[1.5, 2.5], 1);
        assert!(table.contains("1.5"));
        assert!(table.contains("2.5"));
    }

    #[test]
    fn block_label_pads() {
        assert_eq!(block_label(3), "#03");
        assert_eq!(block_label(24), "#24");
    }

    #[test]
    fn top_allocations_lists_largest_first() {
        let allocation = Allocation::from_vec(vec![0.1, 0.3, 0.2]);
        let table = top_allocations_table(&allocation, 2);
        let first = table.find("#01").unwrap();
        let second = table.find("#02").unwrap();
        assert!(first < second);
        assert!(!table.contains("#00"));
    }

    #[test]
    fn marginal_table_shows_sign() {
        let table = marginal_table(&[0.5, -0.25]);
        assert!(table.contains("+0.5000000000"));
        assert!(table.contains("-0.2500000000"));
    }

    #[test]
    fn allocation_list_round_trips_format() {
        let allocation = Allocation::from_vec(vec![0.0, 0.0015]);
        assert_eq!(allocation_list(&allocation), "0.000000,0.001500");
    }
}
