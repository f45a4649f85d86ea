//! Simulator configuration.

use serde::{Deserialize, Serialize};

use qsketch_ir::MAX_QUBITS_DENSE;

/// Default tolerance on the squared norm of a statevector.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Configuration for a [`SimulationService`](crate::SimulationService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register the service accepts.
    pub max_qubits: u32,
    /// Allowed deviation of the total outcome probability from 1.
    pub norm_tolerance: f64,
    /// Fixed RNG seed. When set, every simulation of the same circuit
    /// produces the same histogram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the register limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the normalization tolerance.
    #[must_use]
    pub fn with_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: MAX_QUBITS_DENSE,
            norm_tolerance: DEFAULT_NORM_TOLERANCE,
            seed: None,
        }
    }
}
