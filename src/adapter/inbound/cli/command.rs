//! Command-line interface definitions.
//!
//! Defines the CLI structure for ore-optimize using `clap`. Global flags
//! control output mode and the optional configuration file; each subcommand
//! carries the flags that override the file's `[optimizer]` section.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::OptimizerConfig;

/// Expected-value stake allocator for the ORE mining grid
#[derive(Parser, Debug)]
#[command(name = "ore-optimize")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Only print the allocation
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output and log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the allocation of a budget that maximizes expected value
    Optimize(OptimizeArgs),

    /// Value a given allocation and show its one-unit marginals
    Evaluate(EvaluateArgs),
}

/// Where the opposing stakes come from.
///
/// With neither flag set the built-in sample grid is used.
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// 25 comma-separated opposing stakes (row-major)
    #[arg(long, conflicts_with = "grid_file")]
    pub other: Option<String>,

    /// CSV file with 25 opposing stakes
    #[arg(long)]
    pub grid_file: Option<PathBuf>,
}

/// Flags that override the `[optimizer]` configuration section.
#[derive(Args, Debug, Clone, Default)]
pub struct OptimizerArgs {
    /// Discretization unit for the allocation
    #[arg(long)]
    pub unit: Option<f64>,

    /// Protocol fee fraction on rewards (e.g., 0.10)
    #[arg(long)]
    pub protocol_fee: Option<f64>,
}

impl OptimizerArgs {
    /// Overwrite the configured values with any flags that were given.
    pub fn apply(&self, config: &mut OptimizerConfig) {
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(fee) = self.protocol_fee {
            config.protocol_fee = fee;
        }
    }
}

/// Arguments for the `optimize` subcommand.
#[derive(Parser, Debug)]
pub struct OptimizeArgs {
    /// Total stake to deploy this round
    #[arg(long)]
    pub budget: Option<f64>,

    /// Maximum greedy iterations (default: budget / unit)
    #[arg(long)]
    pub max_iters: Option<usize>,

    /// Number of blocks to list in the top allocations
    #[arg(long, default_value = "8")]
    pub top: usize,

    #[command(flatten)]
    pub optimizer: OptimizerArgs,

    #[command(flatten)]
    pub grid: GridArgs,
}

impl OptimizeArgs {
    /// Merge these flags over the configured optimizer settings.
    pub fn apply(&self, config: &mut OptimizerConfig) {
        self.optimizer.apply(config);
        if let Some(budget) = self.budget {
            config.budget = Some(budget);
        }
        if let Some(max_iters) = self.max_iters {
            config.max_iters = Some(max_iters);
        }
    }
}

/// Arguments for the `evaluate` subcommand.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// 25 comma-separated amounts you stake per block (row-major)
    #[arg(long)]
    pub allocation: String,

    #[command(flatten)]
    pub optimizer: OptimizerArgs,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "ore-optimize");
    }

    #[test]
    fn test_parse_optimize_defaults() {
        let cli = Cli::try_parse_from(["ore-optimize", "optimize", "--budget", "0.5"]).unwrap();
        assert!(!cli.json);
        assert!(cli.config.is_none());
        let Commands::Optimize(args) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.budget, Some(0.5));
        assert_eq!(args.top, 8);
        assert!(args.grid.other.is_none());
        assert!(args.optimizer.unit.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ore-optimize",
            "optimize",
            "--budget",
            "1",
            "--json",
            "-vv",
            "--color",
            "never",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_other_conflicts_with_grid_file() {
        let result = Cli::try_parse_from([
            "ore-optimize",
            "optimize",
            "--other",
            "1,2",
            "--grid-file",
            "grid.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_evaluate_requires_allocation() {
        assert!(Cli::try_parse_from(["ore-optimize", "evaluate"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "ore-optimize",
            "optimize",
            "--budget",
            "2",
            "--unit",
            "0.01",
            "--protocol-fee",
            "0.2",
            "--max-iters",
            "3",
        ])
        .unwrap();
        let Commands::Optimize(args) = cli.command else {
            panic!("expected optimize");
        };

        let mut config = OptimizerConfig::default();
        args.apply(&mut config);
        assert_eq!(config.budget, Some(2.0));
        assert_eq!(config.unit, 0.01);
        assert_eq!(config.protocol_fee, 0.2);
        assert_eq!(config.max_iters, Some(3));
    }

    #[test]
    fn test_missing_flags_keep_config() {
        let mut config = OptimizerConfig {
            budget: Some(0.3),
            unit: 0.05,
            protocol_fee: 0.0,
            max_iters: None,
        };
        OptimizerArgs::default().apply(&mut config);
        assert_eq!(config.unit, 0.05);
        assert_eq!(config.protocol_fee, 0.0);
        assert_eq!(config.budget, Some(0.3));
    }
}
