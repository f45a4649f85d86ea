//! Error types for the IR crate.

use std::fmt;

use crate::gate::GateKind;
use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building circuits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Register size outside the supported range.
    #[error("Register size {requested} is not supported (expected 1..={max} qubits)")]
    InvalidRegisterSize {
        /// The requested number of qubits.
        requested: u32,
        /// The largest register the caller accepts.
        max: u32,
    },

    /// A gate operation failed validation.
    #[error("Invalid gate{}: {reason}", format_gate_context(.gate))]
    InvalidGate {
        /// The gate kind, when it could be determined.
        gate: Option<GateKind>,
        /// Why the operation was rejected.
        reason: GateViolation,
    },

    /// A canned example cannot be built on this register.
    #[error("Example '{example}' requires {required}, got {got} qubits")]
    ExampleRegister {
        /// Name of the example.
        example: String,
        /// Human readable register requirement.
        required: String,
        /// Register size that was requested.
        got: u32,
    },

    /// Unknown example name.
    #[error("Unknown example: '{0}'")]
    UnknownExample(String),
}

/// Reason a gate operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GateViolation {
    /// The gate name does not match any supported kind.
    UnknownKind(String),
    /// The gate needs a target qubit.
    MissingTarget,
    /// The gate needs a control qubit.
    MissingControl,
    /// A target was given to a gate that acts on the whole register.
    UnexpectedTarget,
    /// A control was given to an uncontrolled gate.
    UnexpectedControl,
    /// A qubit index lies outside the register.
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Register size.
        num_qubits: u32,
    },
    /// Control and target name the same qubit.
    ControlEqualsTarget(QubitId),
}

impl fmt::Display for GateViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateViolation::UnknownKind(name) => write!(f, "unsupported gate kind '{name}'"),
            GateViolation::MissingTarget => write!(f, "missing target qubit"),
            GateViolation::MissingControl => write!(f, "missing control qubit"),
            GateViolation::UnexpectedTarget => {
                write!(f, "measurement acts on all qubits and takes no target")
            }
            GateViolation::UnexpectedControl => write!(f, "gate takes no control qubit"),
            GateViolation::QubitOutOfRange { qubit, num_qubits } => {
                write!(f, "qubit {qubit} out of range for {num_qubits}-qubit register")
            }
            GateViolation::ControlEqualsTarget(q) => {
                write!(f, "control and target must be different (both {q})")
            }
        }
    }
}

impl IrError {
    /// Shorthand for an [`IrError::InvalidGate`].
    pub fn invalid_gate(gate: impl Into<Option<GateKind>>, reason: GateViolation) -> Self {
        IrError::InvalidGate {
            gate: gate.into(),
            reason,
        }
    }
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<GateKind>) -> String {
    match gate {
        Some(kind) => format!(" (gate: {})", kind.name()),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
