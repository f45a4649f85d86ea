//! Canned example circuits.
//!
//! Examples are plain sequences of validated appends; the simulator needs no
//! special support for them.

use std::fmt;
use std::str::FromStr;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// A prebuilt circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Example {
    /// `(|00⟩ + |11⟩)/√2` on qubits 0 and 1.
    Bell,
    /// One Grover iteration searching two qubits for `|11⟩`.
    Grover2,
}

impl Example {
    /// All examples, in display order.
    pub const ALL: [Example; 2] = [Example::Bell, Example::Grover2];

    /// Short identifier.
    pub fn name(self) -> &'static str {
        match self {
            Example::Bell => "bell",
            Example::Grover2 => "grover",
        }
    }

    /// Descriptive title.
    pub fn title(self) -> &'static str {
        match self {
            Example::Bell => "Bell State (Entanglement)",
            Example::Grover2 => "Grover's Algorithm (2-Qubit Search)",
        }
    }

    /// Build the example on a register of `num_qubits` qubits.
    pub fn build(self, num_qubits: u32) -> IrResult<Circuit> {
        match self {
            Example::Bell => {
                if num_qubits < 2 {
                    return Err(self.register_error("at least 2", num_qubits));
                }
                Self::bell(num_qubits)
            }
            Example::Grover2 => {
                if num_qubits != 2 {
                    return Err(self.register_error("exactly 2", num_qubits));
                }
                Self::grover2()
            }
        }
    }

    fn register_error(self, required: &str, got: u32) -> IrError {
        IrError::ExampleRegister {
            example: self.title().to_string(),
            required: required.to_string(),
            got,
        }
    }

    fn bell(num_qubits: u32) -> IrResult<Circuit> {
        let mut circuit = Circuit::new(num_qubits)?;
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    fn grover2() -> IrResult<Circuit> {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let mut circuit = Circuit::new(2)?;

        // Uniform superposition
        circuit.h(q0)?.h(q1)?;

        // Oracle: phase-flip |11⟩
        circuit.cz(q0, q1)?;

        // Diffusion: H⊗H · (X⊗X · CZ · X⊗X) · H⊗H
        circuit
            .h(q0)?
            .h(q1)?
            .x(q0)?
            .x(q1)?
            .cz(q0, q1)?
            .x(q0)?
            .x(q1)?
            .h(q0)?
            .h(q1)?;

        Ok(circuit)
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Example {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Example::ALL
            .into_iter()
            .find(|e| e.title() == trimmed || e.name().eq_ignore_ascii_case(trimmed))
            .or_else(|| match trimmed.to_ascii_lowercase().as_str() {
                "grover2" | "grover-2" => Some(Example::Grover2),
                _ => None,
            })
            .ok_or_else(|| IrError::UnknownExample(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;

    #[test]
    fn test_bell_structure() {
        let circuit = Example::Bell.build(2).unwrap();
        let kinds: Vec<_> = circuit.gates().iter().map(|op| op.kind).collect();
        assert_eq!(kinds, vec![GateKind::H, GateKind::CX]);
        assert!(!circuit.has_measure());
    }

    #[test]
    fn test_bell_on_wider_register() {
        let circuit = Example::Bell.build(4).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_register_requirements() {
        assert!(matches!(
            Example::Bell.build(1),
            Err(IrError::ExampleRegister { got: 1, .. })
        ));
        assert!(matches!(
            Example::Grover2.build(3),
            Err(IrError::ExampleRegister { got: 3, .. })
        ));
        assert_eq!(Example::Grover2.build(2).unwrap().len(), 12);
    }

    #[test]
    fn test_parse() {
        assert_eq!("bell".parse::<Example>().unwrap(), Example::Bell);
        assert_eq!(
            "Grover's Algorithm (2-Qubit Search)".parse::<Example>().unwrap(),
            Example::Grover2
        );
        assert_eq!("GROVER".parse::<Example>().unwrap(), Example::Grover2);
        assert!(matches!(
            "teleport".parse::<Example>(),
            Err(IrError::UnknownExample(_))
        ));
    }
}
