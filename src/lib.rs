//! ore-optimize - expected-value stake allocation for the ORE mining grid.
//!
//! Each round, exactly one of 25 blocks wins, uniformly at random. Stakers on
//! the winning block get their stake back plus a pro-rata share of every
//! other block's pool, minus a protocol fee on that reward. This crate values
//! a proposed stake distribution under that rule and searches for the
//! distribution of a fixed budget that maximizes expected value.
//!
//! # Modules
//!
//! - [`domain`] - Valuation model, marginal scans and the greedy allocator
//! - [`infrastructure`] - TOML configuration and logging setup
//! - [`adapter`] - Command-line interface, grid input and reporting
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use ore_optimize::domain::{evaluate, optimize};
//!
//! let opponent = [10.0, 0.0];
//! let allocation = optimize(&opponent, 1.0, 1.0, 0.0, None);
//! assert_eq!(allocation.as_slice(), &[0.0, 1.0]);
//!
//! let valuation = evaluate(&opponent, allocation.as_slice(), 0.0);
//! assert!(valuation.ev > 0.0);
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
