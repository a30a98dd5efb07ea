//! Integration tests for grid file input.

mod support;

use std::path::Path;

use ore_optimize::adapter::inbound::cli::grid::{read_grid_csv, GridSource};
use ore_optimize::error::GridError;

#[test]
fn test_reads_five_by_five_csv() {
    let rows: Vec<String> = (0..5)
        .map(|r| {
            (0..5)
                .map(|c| format!("{}.5", r * 5 + c))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    let file = support::temp_file(&rows.join("\n"), ".csv");

    let grid = read_grid_csv(file.path()).unwrap();
    assert_eq!(grid.len(), support::BLOCKS);
    assert_eq!(grid.as_slice()[0], 0.5);
    assert_eq!(grid.as_slice()[24], 24.5);
}

#[test]
fn test_reads_single_column_csv() {
    let contents = vec!["0.25"; support::BLOCKS].join("\n");
    let file = support::temp_file(&contents, ".csv");

    let grid = read_grid_csv(file.path()).unwrap();
    assert_eq!(grid.total(), 0.25 * support::BLOCKS as f64);
}

#[test]
fn test_csv_with_wrong_count_is_rejected() {
    let file = support::temp_file("1,2,3\n4,5,6\n", ".csv");
    let err = read_grid_csv(file.path()).unwrap_err();
    assert!(matches!(
        err,
        GridError::WrongCount {
            expected: 25,
            found: 6
        }
    ));
}

#[test]
fn test_csv_header_text_is_rejected() {
    let mut contents = String::from("a,b,c,d,e\n");
    contents.push_str(&vec!["0.1"; support::BLOCKS].join(","));
    let file = support::temp_file(&contents, ".csv");

    let err = read_grid_csv(file.path()).unwrap_err();
    assert!(matches!(err, GridError::NotANumber { block: 0, .. }));
}

#[test]
fn test_missing_file_is_read_error() {
    let err = GridSource::File(Path::new("/nonexistent/grid.csv").to_path_buf())
        .load()
        .unwrap_err();
    assert!(matches!(err, GridError::ReadFile { .. }));
}
