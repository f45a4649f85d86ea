//! The supported gate set.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{GateViolation, IrError};

/// A 2×2 complex matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// The closed set of operations a circuit may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Projective measurement of the whole register in the computational basis.
    Measure,
}

/// How many qubit operands a gate takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One target qubit.
    Single,
    /// A control and a target qubit.
    Controlled,
    /// Every qubit of the register, no operands.
    Register,
}

impl GateKind {
    /// All supported kinds, in display order.
    pub const ALL: [GateKind; 5] = [
        GateKind::H,
        GateKind::X,
        GateKind::CX,
        GateKind::CZ,
        GateKind::Measure,
    ];

    /// Get the short name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::CX => "cx",
            GateKind::CZ => "cz",
            GateKind::Measure => "measure",
        }
    }

    /// Label used when listing a circuit.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::CX => "CX",
            GateKind::CZ => "CZ",
            GateKind::Measure => "Measure",
        }
    }

    /// Descriptive label, as offered in gate pickers.
    pub fn long_label(self) -> &'static str {
        match self {
            GateKind::H => "H (Hadamard)",
            GateKind::X => "X (Pauli-X)",
            GateKind::CX => "CX (CNOT)",
            GateKind::CZ => "CZ (Controlled-Z)",
            GateKind::Measure => "Measure",
        }
    }

    /// Operand shape of this gate.
    #[inline]
    pub fn arity(self) -> Arity {
        match self {
            GateKind::H | GateKind::X => Arity::Single,
            GateKind::CX | GateKind::CZ => Arity::Controlled,
            GateKind::Measure => Arity::Register,
        }
    }

    /// Check whether this gate is a unitary evolution step.
    #[inline]
    pub fn is_unitary(self) -> bool {
        !matches!(self, GateKind::Measure)
    }

    /// The 2×2 matrix applied to the target qubit.
    ///
    /// For controlled gates this is the block applied when the control is `|1⟩`.
    /// Measurement has no matrix.
    pub fn matrix(self) -> Option<Matrix2> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        match self {
            GateKind::H => {
                let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
                Some([[s, s], [s, -s]])
            }
            GateKind::X | GateKind::CX => Some([[zero, one], [one, zero]]),
            GateKind::CZ => Some([[one, zero], [zero, -one]]),
            GateKind::Measure => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(kind) = GateKind::ALL
            .into_iter()
            .find(|k| k.long_label() == trimmed)
        {
            return Ok(kind);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "h" | "hadamard" => Ok(GateKind::H),
            "x" | "not" | "pauli-x" => Ok(GateKind::X),
            "cx" | "cnot" => Ok(GateKind::CX),
            "cz" => Ok(GateKind::CZ),
            "measure" | "m" => Ok(GateKind::Measure),
            _ => Err(IrError::invalid_gate(
                None,
                GateViolation::UnknownKind(trimmed.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_unitary(m: &Matrix2) -> bool {
        // M · M† == I
        for i in 0..2 {
            for j in 0..2 {
                let acc: Complex64 = (0..2).map(|k| m[i][k] * m[j][k].conj()).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                if (acc - Complex64::new(expected, 0.0)).norm() > 1e-12 {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_gate_arity() {
        assert_eq!(GateKind::H.arity(), Arity::Single);
        assert_eq!(GateKind::X.arity(), Arity::Single);
        assert_eq!(GateKind::CX.arity(), Arity::Controlled);
        assert_eq!(GateKind::CZ.arity(), Arity::Controlled);
        assert_eq!(GateKind::Measure.arity(), Arity::Register);
    }

    #[test]
    fn test_matrices_are_unitary() {
        for kind in GateKind::ALL {
            match kind.matrix() {
                Some(m) => assert!(is_unitary(&m), "{kind} matrix is not unitary"),
                None => assert!(!kind.is_unitary()),
            }
        }
    }

    #[test]
    fn test_parse_short_and_long_names() {
        assert_eq!("h".parse::<GateKind>().unwrap(), GateKind::H);
        assert_eq!("CNOT".parse::<GateKind>().unwrap(), GateKind::CX);
        assert_eq!("CZ (Controlled-Z)".parse::<GateKind>().unwrap(), GateKind::CZ);
        assert_eq!("X (Pauli-X)".parse::<GateKind>().unwrap(), GateKind::X);
        assert_eq!("Measure".parse::<GateKind>().unwrap(), GateKind::Measure);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = "toffoli".parse::<GateKind>().unwrap_err();
        assert!(matches!(
            err,
            IrError::InvalidGate {
                gate: None,
                reason: GateViolation::UnknownKind(ref name),
            } if name == "toffoli"
        ));
    }
}
