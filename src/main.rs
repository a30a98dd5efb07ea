use std::path::Path;

use clap::Parser;
use miette::Report;
use tracing::debug;

use ore_optimize::adapter::inbound::cli::command::{Cli, Commands};
use ore_optimize::adapter::inbound::cli::output::{self, OutputConfig};
use ore_optimize::adapter::inbound::cli::{diagnostic, evaluate, optimize};
use ore_optimize::error::{ConfigError, Error};
use ore_optimize::infrastructure::config::Config;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        cli.color,
    ));

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(report) => fail(&report),
    };
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".into(),
        _ => config.logging.level = "trace".into(),
    }
    config.init_logging();
    debug!(config = ?cli.config, "ore-optimize starting");

    let result = match &cli.command {
        Commands::Optimize(args) => optimize::execute(args, config),
        Commands::Evaluate(args) => evaluate::execute(args, config),
    };

    if let Err(e) = result {
        debug!(error = %e, "Command failed");
        fail(&diagnostic::report(e));
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, Report> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| diagnostic::report(ConfigError::ReadFile(e).into()))?;
    Config::parse_toml(&content).map_err(|e| match e {
        Error::Config(ConfigError::Parse(err)) => diagnostic::toml_report(path, &content, &err),
        other => diagnostic::report(other),
    })
}

fn fail(report: &Report) -> ! {
    if output::is_json() {
        output::error_json(&report.to_string());
    } else {
        eprintln!("{report:?}");
    }
    std::process::exit(1);
}
