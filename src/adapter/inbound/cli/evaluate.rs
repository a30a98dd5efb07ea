//! Handler for the `evaluate` command.

use super::command::EvaluateArgs;
use super::grid::{parse_stakes, GridSource};
use super::{output, report};
use crate::domain::{evaluate, Allocation, MarginalScan};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute the evaluate command.
///
/// # Errors
///
/// Returns an error if the merged settings are invalid or either grid cannot
/// be parsed.
pub fn execute(args: &EvaluateArgs, mut config: Config) -> Result<()> {
    args.optimizer.apply(&mut config.optimizer);
    config.validate()?;
    let settings = config.optimizer.allocator();

    let allocation = Allocation::from_vec(parse_stakes(&args.allocation)?);
    let source = GridSource::from_args(&args.grid);
    if source == GridSource::Sample {
        output::warning(
            "no grid supplied; using the built-in sample grid (set --other or --grid-file)",
        );
    }
    let opponent = source.load()?;

    let valuation = evaluate(
        opponent.as_slice(),
        allocation.as_slice(),
        settings.protocol_fee,
    );
    let scan = MarginalScan::compute(
        opponent.as_slice(),
        allocation.as_slice(),
        settings.unit,
        settings.protocol_fee,
    );

    if output::is_json() {
        output::json_output(&report::evaluate_json(
            opponent.as_slice(),
            &allocation,
            settings.unit,
            settings.protocol_fee,
            &valuation,
            &scan.deltas,
        ));
        return Ok(());
    }
    output::quiet_result(&format!("{:.8}", valuation.ev));

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Opposing stakes per block");
    output::lines(&report::grid_table(opponent.as_slice(), 4));
    output::section("Your allocation per block");
    output::lines(&report::grid_table(allocation.as_slice(), 4));
    output::field(
        "Protocol fee",
        format!("{:.2}%", settings.protocol_fee * 100.0),
    );

    output::section("Results");
    report::print_valuation(&valuation);

    output::section(&format!("Marginal EV for one more unit of {:.6}", settings.unit));
    output::lines(&report::marginal_table(&scan.deltas));
    match scan.best() {
        Some((block, delta)) if delta > 0.0 => output::note(&format!(
            "best next unit: block {} ({})",
            report::block_label(block),
            output::positive(format!("{delta:+.10}"))
        )),
        _ => output::note("no block gains from another unit"),
    }

    Ok(())
}
