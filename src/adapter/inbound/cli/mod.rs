//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod evaluate;
pub mod grid;
pub mod optimize;
pub mod output;
pub mod report;
