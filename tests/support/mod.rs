//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const BLOCKS: usize = 25;

/// Comma-separated list of `values`.
pub fn list(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// A flat grid with one empty block at `empty`.
pub fn grid_with_empty_block(stake: f64, empty: usize) -> Vec<f64> {
    let mut grid = vec![stake; BLOCKS];
    grid[empty] = 0.0;
    grid
}

/// Write `contents` to a temporary file with the given suffix.
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("ore-optimize-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
