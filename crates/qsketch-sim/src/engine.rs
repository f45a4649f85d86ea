//! Unitary evolution of a circuit.

use tracing::{instrument, trace};

use qsketch_ir::Circuit;

use crate::statevector::Statevector;

/// Outcome of evolving a circuit: the final state plus where the circuit
/// asked for measurement.
#[derive(Debug, Clone)]
pub struct Evolution {
    /// State after every unitary operation has been applied.
    pub state: Statevector,
    /// Positions of measurement operations in the gate sequence.
    pub measure_positions: Vec<usize>,
}

impl Evolution {
    /// Check if the circuit contained a measurement.
    pub fn is_measured(&self) -> bool {
        !self.measure_positions.is_empty()
    }
}

/// Applies a circuit's gates, in order, to `|0…0⟩`.
///
/// Evolution is deterministic: the same circuit always produces a bitwise
/// identical statevector. The norm is never corrected.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateVectorEngine;

impl StateVectorEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Evolve the circuit and return the final state.
    pub fn evolve(&self, circuit: &Circuit) -> Statevector {
        self.run(circuit).state
    }

    /// Evolve the circuit, recording measurement positions.
    #[instrument(skip_all, fields(num_qubits = circuit.num_qubits(), ops = circuit.len()))]
    pub fn run(&self, circuit: &Circuit) -> Evolution {
        let mut state = Statevector::new(circuit.num_qubits());
        let mut measure_positions = Vec::new();

        for (position, op) in circuit.gates().iter().enumerate() {
            if op.is_measure() {
                measure_positions.push(position);
                continue;
            }
            trace!(position, %op, "applying gate");
            // Circuit::append has validated every op against this register
            state.apply_validated(op);
        }

        Evolution {
            state,
            measure_positions,
        }
    }
}
