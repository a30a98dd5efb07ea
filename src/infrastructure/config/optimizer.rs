//! Allocator settings.

use serde::Deserialize;

use crate::domain::AllocatorConfig;

/// Optimizer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptimizerConfig {
    /// Total stake to deploy this round. Usually given on the command line.
    #[serde(default)]
    pub budget: Option<f64>,
    /// Discretization unit for the greedy allocator.
    #[serde(default = "default_unit")]
    pub unit: f64,
    /// Protocol fee on mining rewards (e.g., 0.10 = 10%).
    #[serde(default = "default_protocol_fee")]
    pub protocol_fee: f64,
    /// Cap on greedy iterations (default: budget / unit).
    #[serde(default)]
    pub max_iters: Option<usize>,
}

const fn default_unit() -> f64 {
    0.001
}

const fn default_protocol_fee() -> f64 {
    0.10
}

impl OptimizerConfig {
    /// Allocator settings derived from this configuration.
    #[must_use]
    pub const fn allocator(&self) -> AllocatorConfig {
        AllocatorConfig {
            unit: self.unit,
            protocol_fee: self.protocol_fee,
            max_iterations: self.max_iters,
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            budget: None,
            unit: default_unit(),
            protocol_fee: default_protocol_fee(),
            max_iters: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_round_settings() {
        let config = OptimizerConfig::default();
        assert_eq!(config.unit, 0.001);
        assert_eq!(config.protocol_fee, 0.10);
        assert_eq!(config.budget, None);
    }

    #[test]
    fn allocator_carries_fields() {
        let config = OptimizerConfig {
            budget: Some(1.0),
            unit: 0.01,
            protocol_fee: 0.05,
            max_iters: Some(7),
        };
        let alloc = config.allocator();
        assert_eq!(alloc.unit, 0.01);
        assert_eq!(alloc.protocol_fee, 0.05);
        assert_eq!(alloc.max_iterations, Some(7));
    }
}
