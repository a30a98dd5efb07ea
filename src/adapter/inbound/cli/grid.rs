//! Stake grid input: inline lists, CSV files and the built-in sample.
//!
//! Every source must yield exactly [`GRID_SIZE`] finite, non-negative
//! numbers in row-major order. Anything else is rejected here so the domain
//! never sees a malformed vector.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::command::GridArgs;
use crate::domain::{OpponentStakes, GRID_SIZE};
use crate::error::GridError;

/// Example opposing stakes, used when no grid is supplied.
const SAMPLE_GRID: [f64; GRID_SIZE] = [
    0.3356, 0.3281, 0.346, 0.3346, 0.3148, //
    0.3745, 0.341, 0.3288, 0.3097, 0.3339, //
    0.3669, 0.3444, 0.3456, 0.3495, 0.3425, //
    0.3402, 0.3399, 0.3118, 0.3346, 0.3227, //
    0.3172, 0.3455, 0.3681, 0.3423, 0.3198,
];

/// Source of the opposing stake grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    /// Comma-separated list given on the command line.
    Inline(String),
    /// CSV file.
    File(PathBuf),
    /// Built-in sample grid.
    Sample,
}

impl GridSource {
    /// Pick the source selected by the command-line flags.
    #[must_use]
    pub fn from_args(args: &GridArgs) -> Self {
        if let Some(list) = &args.other {
            Self::Inline(list.clone())
        } else if let Some(path) = &args.grid_file {
            Self::File(path.clone())
        } else {
            Self::Sample
        }
    }

    /// Read and validate the grid.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the source does not hold exactly
    /// [`GRID_SIZE`] valid stakes.
    pub fn load(&self) -> Result<OpponentStakes, GridError> {
        match self {
            Self::Inline(list) => parse_grid(list),
            Self::File(path) => read_grid_csv(path),
            Self::Sample => Ok(sample_grid()),
        }
    }
}

/// The built-in sample grid.
#[must_use]
pub fn sample_grid() -> OpponentStakes {
    OpponentStakes::new(SAMPLE_GRID.to_vec())
}

/// Parse a comma-separated opposing grid.
///
/// # Errors
///
/// Returns a [`GridError`] on a bad token, a negative value, or the wrong
/// number of entries.
pub fn parse_grid(input: &str) -> Result<OpponentStakes, GridError> {
    parse_stakes(input).map(OpponentStakes::new)
}

/// Parse a comma-separated list of [`GRID_SIZE`] stakes.
///
/// Surrounding whitespace is trimmed and empty entries are skipped.
///
/// # Errors
///
/// Returns a [`GridError`] on a bad token, a negative value, or the wrong
/// number of entries.
pub fn parse_stakes(input: &str) -> Result<Vec<f64>, GridError> {
    let tokens = input.split(',').map(str::trim).filter(|t| !t.is_empty());
    collect_stakes(tokens)
}

/// Read every non-blank cell of a CSV file as a stake.
///
/// Rows may have any width; cells are taken row by row.
///
/// # Errors
///
/// Returns [`GridError::ReadFile`] if the file cannot be read, or another
/// [`GridError`] if its contents are not a valid grid.
pub fn read_grid_csv(path: &Path) -> Result<OpponentStakes, GridError> {
    let read_error = |source| GridError::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(read_error)?;

    let mut cells = Vec::with_capacity(GRID_SIZE);
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        cells.extend(
            record
                .iter()
                .filter(|cell| !cell.is_empty())
                .map(str::to_owned),
        );
    }
    debug!(path = %path.display(), cells = cells.len(), "Read grid file");

    collect_stakes(cells.iter().map(String::as_str)).map(OpponentStakes::new)
}

fn collect_stakes<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Vec<f64>, GridError> {
    let mut values = Vec::with_capacity(GRID_SIZE);
    for (block, token) in tokens.enumerate() {
        let value: f64 = token.parse().map_err(|_| GridError::NotANumber {
            token: token.to_string(),
            block,
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(GridError::InvalidStake { block, value });
        }
        values.push(value);
    }

    if values.len() != GRID_SIZE {
        return Err(GridError::WrongCount {
            expected: GRID_SIZE,
            found: values.len(),
        });
    }
    Ok(values)
}
