//! Handler for the `optimize` command.

use tracing::info;

use super::command::OptimizeArgs;
use super::grid::GridSource;
use super::{output, report};
use crate::domain::{evaluate, GreedyAllocator, MarginalScan};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute the optimize command.
///
/// # Errors
///
/// Returns an error if the merged settings are invalid, no budget was given,
/// or the opposing grid cannot be loaded.
pub fn execute(args: &OptimizeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config.optimizer);
    config.validate()?;
    let budget = config.budget()?;
    let settings = config.optimizer.allocator();

    let source = GridSource::from_args(&args.grid);
    if source == GridSource::Sample {
        output::warning(
            "no grid supplied; using the built-in sample grid (set --other or --grid-file)",
        );
    }
    let opponent = source.load()?;
    info!(?source, blocks = opponent.len(), budget, "Loaded opposing grid");

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Opposing stakes per block");
    output::lines(&report::grid_table(opponent.as_slice(), 4));
    output::field("Budget", format!("{budget:.6}"));
    output::field("Unit", format!("{:.6}", settings.unit));
    output::field(
        "Protocol fee",
        format!("{:.2}%", settings.protocol_fee * 100.0),
    );

    let spinner = output::spinner("Running greedy optimizer");
    let run = GreedyAllocator::new(settings).run(opponent.as_slice(), budget);
    output::spinner_success(
        &spinner,
        &format!("{} units committed ({})", run.steps, run.stop),
    );

    let valuation = evaluate(
        opponent.as_slice(),
        run.allocation.as_slice(),
        settings.protocol_fee,
    );
    let scan = MarginalScan::compute(
        opponent.as_slice(),
        run.allocation.as_slice(),
        settings.unit,
        settings.protocol_fee,
    );

    if output::is_json() {
        output::json_output(&report::optimize_json(
            opponent.as_slice(),
            budget,
            settings.unit,
            settings.protocol_fee,
            &run,
            &valuation,
            &scan.deltas,
        ));
        return Ok(());
    }
    output::quiet_result(&report::allocation_list(&run.allocation));

    output::section("Recommended allocation per block");
    output::lines(&report::grid_table(run.allocation.as_slice(), 4));

    output::section("Results");
    report::print_valuation(&valuation);
    output::field("Stopped", output::highlight(run.stop));
    if output::verbosity() > 0 {
        output::field("Iterations", run.iterations);
        output::field("Budget units", run.budget_units);
    }

    if !run.allocation.is_zero() {
        output::section("Top allocations");
        output::lines(&report::top_allocations_table(&run.allocation, args.top));
    }

    output::section("Marginal EV for one more unit");
    output::lines(&report::marginal_table(&scan.deltas));

    Ok(())
}
