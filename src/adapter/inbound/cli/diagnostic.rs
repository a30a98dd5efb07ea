//! Miette-based error diagnostics for CLI error presentation.
//!
//! Errors reaching the command line are wrapped in a diagnostic with a help
//! line. TOML syntax errors also carry the file content and a label at the
//! offending span.

use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::domain::GRID_SIZE;
use crate::error::{ConfigError, Error, GridError};

/// Syntax error inside a configuration file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(ore_optimize::config::syntax),
    help("see the [optimizer] and [logging] sections in the README")
)]
pub struct ConfigSyntaxError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,
}

/// Invalid or missing setting.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(ore_optimize::config))]
pub struct SettingsError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Malformed stake grid.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid grid input: {message}")]
#[diagnostic(code(ore_optimize::input))]
pub struct InputError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Diagnostic for a TOML parse failure in `path`.
#[must_use]
pub fn toml_report(path: &Path, content: &str, err: &toml::de::Error) -> Report {
    let span: SourceSpan = err
        .span()
        .map_or_else(|| (0, 0).into(), |range| (range.start, range.len()).into());
    Report::new(ConfigSyntaxError {
        message: format!("failed to parse config: {}", err.message()),
        src: NamedSource::new(path.display().to_string(), content.to_string()),
        span,
    })
}

/// Wrap a command error in a diagnostic with a suggestion.
#[must_use]
pub fn report(error: Error) -> Report {
    match error {
        Error::Grid(err) => {
            let help = match &err {
                GridError::WrongCount { .. } | GridError::NotANumber { .. } => Some(format!(
                    "supply {GRID_SIZE} comma-separated numbers in row-major order"
                )),
                GridError::InvalidStake { .. } => {
                    Some("stakes must be finite and non-negative".to_string())
                }
                GridError::ReadFile { .. } => None,
            };
            Report::new(InputError {
                message: err.to_string(),
                help,
            })
        }
        Error::Config(err) => {
            let help = match &err {
                ConfigError::MissingField { field: "budget" } => {
                    Some("pass --budget or set budget under [optimizer]".to_string())
                }
                ConfigError::InvalidValue {
                    field: "protocol_fee",
                    ..
                } => Some("use a fraction such as 0.10 for a 10% fee".to_string()),
                _ => None,
            };
            Report::new(SettingsError {
                message: err.to_string(),
                help,
            })
        }
        other => Report::msg(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_errors_get_input_help() {
        let report = report(Error::Grid(GridError::WrongCount {
            expected: GRID_SIZE,
            found: 3,
        }));
        assert!(report.to_string().contains("expected exactly 25 numbers"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("comma-separated"));
    }

    #[test]
    fn missing_budget_suggests_flag() {
        let report = report(Error::Config(ConfigError::MissingField { field: "budget" }));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--budget"));
    }

    #[test]
    fn toml_report_points_at_span() {
        let content = "[optimizer]\nunit = \n";
        let err = toml::from_str::<toml::Value>(content).unwrap_err();
        let report = toml_report(Path::new("ore.toml"), content, &err);
        assert!(report.to_string().starts_with("failed to parse config"));
        assert!(report.labels().is_some());
    }
}
