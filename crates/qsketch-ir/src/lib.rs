//! qsketch Circuit Representation
//!
//! This crate provides the data structures for describing small quantum
//! circuits: the supported gate set, validated gate applications, and an
//! append-only circuit over a fixed-size register.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addressing a qubit of the register
//! - **Gates**: [`GateKind`], the closed set of supported operations, with
//!   their [`Arity`] and 2×2 matrices
//! - **Operations**: [`GateOp`] combining a gate with its operands
//! - **Circuit**: [`Circuit`], validated on every append
//! - **Examples**: [`Example`] prebuilt circuits
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsketch_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.gates().len(), 3);
//!
//! // Out-of-range and self-controlled gates are rejected up front
//! assert!(circuit.x(QubitId(2)).is_err());
//! assert!(circuit.cx(QubitId(1), QubitId(1)).is_err());
//! assert_eq!(circuit.gates().len(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X` | 1 | Pauli-X (bit flip) |
//! | `CX` | 2 | Controlled-NOT |
//! | `CZ` | 2 | Controlled-Z (phase flip when both qubits are 1) |
//! | `Measure` | all | Computational-basis measurement of the register |
//!
//! # Bit Ordering
//!
//! Qubit `i` is bit `i` of an amplitude index (qubit 0 is least significant).
//! Outcome bitstrings list qubit 0 first.

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod library;
pub mod qubit;

pub use circuit::{Circuit, CircuitSpec, MAX_QUBITS_DENSE};
pub use error::{GateViolation, IrError, IrResult};
pub use gate::{Arity, GateKind, Matrix2};
pub use instruction::GateOp;
pub use library::Example;
pub use qubit::QubitId;
