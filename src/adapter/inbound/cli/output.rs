//! Terminal output formatting.
//!
//! Human-readable output uses colored symbols and indented fields. JSON mode
//! replaces all of it with a single document per command so results can be
//! piped into other tools; quiet mode keeps only the bare result.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress everything but the result.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Emit ANSI colors.
    pub color: bool,
}

impl OutputConfig {
    /// Create a new output configuration.
    ///
    /// Colors are never used in JSON mode.
    #[must_use]
    pub fn new(json: bool, quiet: bool, verbose: u8, color: ColorChoice) -> Self {
        let color = !json
            && match color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => {
                    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
                }
            };
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("{} {}", "ore-optimize".bold(), version.dimmed());
    } else {
        println!("ore-optimize {version}");
    }
    println!();
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    if config.color {
        println!("{}", title.bold());
    } else {
        println!("{title}");
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    if regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("  {:<28} {}", label.dimmed(), value);
    } else {
        println!("  {label:<28} {value}");
    }
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    let config = read_config();
    if regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a warning line to stderr.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "warning",
                "payload": { "message": message },
            })
        );
        return;
    }
    if config.quiet {
        return;
    }

    if config.color {
        eprintln!("  {} {}", "⚠".yellow(), message);
    } else {
        eprintln!("  warning: {message}");
    }
}

/// Print an error in JSON mode.
///
/// Human-readable errors are rendered by the diagnostic layer instead.
pub fn error_json(message: &str) {
    eprintln!(
        "{}",
        json!({
            "type": "error",
            "payload": { "message": message },
        })
    );
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();
    if regular_output_suppressed(config) {
        return;
    }

    if config.color {
        println!("  {}", message.dimmed());
    } else {
        println!("  {message}");
    }
}

/// Emit a JSON value directly.
pub fn json_output(value: &serde_json::Value) {
    println!("{value}");
}

/// Print the bare result line in quiet mode.
pub fn quiet_result(line: &str) {
    let config = read_config();
    if config.quiet && !config.json {
        println!("{line}");
    }
}

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner on stderr.
///
/// Returns a hidden progress bar in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if regular_output_suppressed(config) {
        return indicatif::ProgressBar::hidden();
    }

    let pb = indicatif::ProgressBar::new_spinner();
    let style = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if regular_output_suppressed(config) {
        pb.finish_and_clear();
        return;
    }

    if config.color {
        pb.finish_with_message(format!("{} {}", "✓".green(), message));
    } else {
        pb.finish_with_message(format!("done: {message}"));
    }
}

/// Format a value green when colors are on.
pub fn positive(value: impl Display) -> String {
    if read_config().color {
        value.green().to_string()
    } else {
        value.to_string()
    }
}

/// Format a value red when colors are on.
pub fn negative(value: impl Display) -> String {
    if read_config().color {
        value.red().to_string()
    } else {
        value.to_string()
    }
}

/// Format a value cyan when colors are on.
pub fn highlight(value: impl Display) -> String {
    if read_config().color {
        value.cyan().to_string()
    } else {
        value.to_string()
    }
}

/// Format a signed value green when above zero and red otherwise.
pub fn signed(value: f64, text: impl Display) -> String {
    if value > 0.0 {
        positive(text)
    } else {
        negative(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_disables_color() {
        let config = OutputConfig::new(true, false, 0, ColorChoice::Always);
        assert!(!config.color);
    }

    #[test]
    fn color_choice_is_respected() {
        assert!(OutputConfig::new(false, false, 0, ColorChoice::Always).color);
        assert!(!OutputConfig::new(false, false, 0, ColorChoice::Never).color);
    }

    #[test]
    fn quiet_and_json_suppress_regular_output() {
        let quiet = OutputConfig::new(false, true, 0, ColorChoice::Never);
        let json = OutputConfig::new(true, false, 0, ColorChoice::Never);
        let normal = OutputConfig::new(false, false, 0, ColorChoice::Never);
        assert!(regular_output_suppressed(quiet));
        assert!(regular_output_suppressed(json));
        assert!(!regular_output_suppressed(normal));
    }
}
