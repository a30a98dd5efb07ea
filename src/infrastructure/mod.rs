//! Configuration and process-level setup.

pub mod config;
