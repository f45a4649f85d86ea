//! Append-only circuit over a fixed-size register.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::GateOp;
use crate::qubit::QubitId;

/// Largest register a dense statevector can address on ordinary hosts.
///
/// `2^30` amplitudes of 16 bytes each is 16 GiB; anything wider will not
/// allocate.
pub const MAX_QUBITS_DENSE: u32 = 30;

/// A quantum circuit.
///
/// The register size is fixed at construction. Operations are appended in
/// application order and never modified or removed; a circuit of another size
/// is a new circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CircuitSpec")]
pub struct Circuit {
    /// Number of qubits in the register.
    num_qubits: u32,
    /// Applied operations, in order.
    #[serde(rename = "gates")]
    ops: Vec<GateOp>,
}

/// Unvalidated circuit description, as read from a file.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitSpec {
    /// Number of qubits in the register.
    pub num_qubits: u32,
    /// Operations to append, in order.
    #[serde(default)]
    pub gates: Vec<GateOp>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> IrResult<Self> {
        Self::with_limit(num_qubits, MAX_QUBITS_DENSE)
    }

    /// Create an empty circuit, accepting at most `max_qubits` qubits.
    pub fn with_limit(num_qubits: u32, max_qubits: u32) -> IrResult<Self> {
        let max = max_qubits.min(MAX_QUBITS_DENSE);
        if num_qubits == 0 || num_qubits > max {
            return Err(IrError::InvalidRegisterSize {
                requested: num_qubits,
                max,
            });
        }
        Ok(Self {
            num_qubits,
            ops: Vec::new(),
        })
    }

    /// Validate `op` against this register and append it.
    ///
    /// On error the circuit is left unchanged.
    pub fn append(&mut self, op: GateOp) -> IrResult<&mut Self> {
        op.validate(self.num_qubits)?;
        self.ops.push(op);
        Ok(self)
    }

    // =========================================================================
    // Gate helpers
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(GateOp::h(qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(GateOp::x(qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(GateOp::cx(control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(GateOp::cz(control, target))
    }

    /// Measure all qubits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        self.append(GateOp::measure())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The applied operations, in order.
    pub fn gates(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of applied operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if no operation has been applied.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Check if the circuit contains a measurement.
    pub fn has_measure(&self) -> bool {
        self.ops.iter().any(GateOp::is_measure)
    }

    /// Iterate over the unitary operations, skipping measurements.
    pub fn unitary_ops(&self) -> impl Iterator<Item = &GateOp> {
        self.ops.iter().filter(|op| op.kind.is_unitary())
    }
}

impl TryFrom<CircuitSpec> for Circuit {
    type Error = IrError;

    fn try_from(spec: CircuitSpec) -> IrResult<Self> {
        let mut circuit = Circuit::new(spec.num_qubits)?;
        for op in spec.gates {
            circuit.append(op)?;
        }
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit: {} qubits, {} ops", self.num_qubits, self.ops.len())?;
        for (i, op) in self.ops.iter().enumerate() {
            writeln!(f, "  {i:>3}: {op}")?;
        }
        Ok(())
    }
}
