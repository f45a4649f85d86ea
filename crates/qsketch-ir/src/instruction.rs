//! Gate applications: a gate kind together with its qubit operands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GateViolation, IrError, IrResult};
use crate::gate::{Arity, GateKind};
use crate::qubit::QubitId;

/// One operation applied to a register.
///
/// A `GateOp` built through the constructors is well-formed; one built through
/// [`GateOp::new`] or deserialized from user input must pass
/// [`GateOp::validate`] before it means anything. [`Circuit::append`] always
/// validates.
///
/// [`Circuit::append`]: crate::Circuit::append
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateOp {
    /// The kind of gate.
    pub kind: GateKind,
    /// Target qubit, absent for measurement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<QubitId>,
    /// Control qubit, present only for controlled gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<QubitId>,
}

impl GateOp {
    /// Create an operation from untyped parts.
    pub fn new(kind: GateKind, target: Option<QubitId>, control: Option<QubitId>) -> Self {
        Self {
            kind,
            target,
            control,
        }
    }

    /// Hadamard on `target`.
    pub fn h(target: QubitId) -> Self {
        Self::new(GateKind::H, Some(target), None)
    }

    /// Pauli-X on `target`.
    pub fn x(target: QubitId) -> Self {
        Self::new(GateKind::X, Some(target), None)
    }

    /// CNOT from `control` onto `target`.
    pub fn cx(control: QubitId, target: QubitId) -> Self {
        Self::new(GateKind::CX, Some(target), Some(control))
    }

    /// Controlled-Z between `control` and `target`.
    pub fn cz(control: QubitId, target: QubitId) -> Self {
        Self::new(GateKind::CZ, Some(target), Some(control))
    }

    /// Measure every qubit.
    pub fn measure() -> Self {
        Self::new(GateKind::Measure, None, None)
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        self.kind == GateKind::Measure
    }

    /// Check the operands against a register of `num_qubits` qubits.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let fail = |reason| Err(IrError::invalid_gate(self.kind, reason));

        match self.kind.arity() {
            Arity::Register => {
                if self.target.is_some() {
                    return fail(GateViolation::UnexpectedTarget);
                }
                if self.control.is_some() {
                    return fail(GateViolation::UnexpectedControl);
                }
                Ok(())
            }
            Arity::Single => {
                let Some(target) = self.target else {
                    return fail(GateViolation::MissingTarget);
                };
                if self.control.is_some() {
                    return fail(GateViolation::UnexpectedControl);
                }
                check_range(self.kind, target, num_qubits)
            }
            Arity::Controlled => {
                let Some(target) = self.target else {
                    return fail(GateViolation::MissingTarget);
                };
                let Some(control) = self.control else {
                    return fail(GateViolation::MissingControl);
                };
                check_range(self.kind, target, num_qubits)?;
                check_range(self.kind, control, num_qubits)?;
                if control == target {
                    return fail(GateViolation::ControlEqualsTarget(target));
                }
                Ok(())
            }
        }
    }
}

fn check_range(kind: GateKind, qubit: QubitId, num_qubits: u32) -> IrResult<()> {
    if qubit.0 < num_qubits {
        Ok(())
    } else {
        Err(IrError::invalid_gate(
            kind,
            GateViolation::QubitOutOfRange { qubit, num_qubits },
        ))
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind.arity(), self.control, self.target) {
            (Arity::Register, _, _) => write!(f, "{} all", self.kind),
            (Arity::Controlled, Some(c), Some(t)) => write!(f, "{} {c} -> {t}", self.kind),
            (_, _, Some(t)) => write!(f, "{} {t}", self.kind),
            _ => write!(f, "{} ?", self.kind),
        }
    }
}
