//! qsketch Statevector Simulator
//!
//! Exact statevector evolution of qsketch circuits followed by Born-rule
//! shot sampling.
//!
//! # Features
//!
//! - **Exact Evolution**: Full statevector representation, `2^n` complex amplitudes
//! - **Implicit Measurement**: Circuits without a measurement are measured on a working copy
//! - **Reproducible Sampling**: Optional fixed seed for the shot RNG
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 5 | 512 B | Instant |
//! | 10 | ~16 KB | Instant |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//! | 30 | ~16 GB | Not recommended |
//!
//! # Example
//!
//! ```
//! use qsketch_ir::{Circuit, QubitId};
//! use qsketch_sim::SimulationService;
//!
//! let mut circuit = Circuit::new(2)?;
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//!
//! let result = SimulationService::new().simulate(&circuit, 1000)?;
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! assert!(result.implicit_measure);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod counts;
mod engine;
mod error;
mod sampler;
mod service;
mod statevector;

pub use config::{DEFAULT_NORM_TOLERANCE, SimulatorConfig};
pub use counts::OutcomeHistogram;
pub use engine::{Evolution, StateVectorEngine};
pub use error::{SimError, SimResult};
pub use sampler::MeasurementSampler;
pub use service::{SimulationResult, SimulationService};
pub use statevector::{Statevector, index_to_bitstring};
