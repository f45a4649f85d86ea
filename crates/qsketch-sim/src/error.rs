//! Error types for the simulator crate.

use thiserror::Error;

/// Errors produced while simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit has no operations to simulate.
    #[error("Circuit is empty: append at least one gate before simulating")]
    EmptyCircuit,

    /// Shot count must be at least 1.
    #[error("Invalid shot count {0}: at least 1 shot is required")]
    InvalidShotCount(u64),

    /// Outcome probabilities do not sum to 1.
    ///
    /// Gate application is norm preserving, so this indicates an engine bug
    /// rather than bad input.
    #[error("Statevector is not normalized: squared norm is {norm}")]
    UnnormalizedState {
        /// The observed squared norm.
        norm: f64,
    },

    /// Circuit exceeds the configured register limit.
    #[error("Circuit has {num_qubits} qubits but the simulator is limited to {max}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        num_qubits: u32,
        /// Configured limit.
        max: u32,
    },

    /// Amplitude vector length is not a power of two.
    #[error("Amplitude vector of length {0} does not describe a qubit register")]
    DimensionMismatch(usize),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qsketch_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
