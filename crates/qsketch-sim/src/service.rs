//! Simulation service: evolve, then sample.

use std::borrow::Cow;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qsketch_ir::{Circuit, GateOp};

use crate::config::SimulatorConfig;
use crate::counts::OutcomeHistogram;
use crate::engine::StateVectorEngine;
use crate::error::{SimError, SimResult};
use crate::sampler::MeasurementSampler;
use crate::statevector::Statevector;

/// Result of simulating a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Register size.
    pub num_qubits: u32,
    /// The gate sequence that was evaluated, including any implicit measurement.
    pub gates: Vec<GateOp>,
    /// Whether a measurement was appended because the circuit had none.
    pub implicit_measure: bool,
    /// Sampled outcome counts.
    pub counts: OutcomeHistogram,
    /// Wall-clock time spent evolving and sampling.
    pub execution_time_ms: u64,
}

impl SimulationResult {
    /// Number of shots taken.
    pub fn shots(&self) -> u64 {
        self.counts.shots()
    }
}

/// Runs circuits through the statevector engine and measurement sampler.
///
/// The service holds only configuration; independent simulations may run on
/// separate threads against one shared service.
#[derive(Debug, Clone, Default)]
pub struct SimulationService {
    config: SimulatorConfig,
    engine: StateVectorEngine,
}

impl SimulationService {
    /// Create a service with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with the given configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            engine: StateVectorEngine::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulate `circuit` with `shots` measurement trials.
    ///
    /// A circuit without a measurement is evaluated as if one were appended;
    /// `circuit` itself is never modified.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits(), ops = circuit.len()))]
    pub fn simulate(&self, circuit: &Circuit, shots: u64) -> SimResult<SimulationResult> {
        if circuit.is_empty() {
            return Err(SimError::EmptyCircuit);
        }
        MeasurementSampler::check_shots(shots)?;
        self.check_size(circuit)?;

        let start = Instant::now();

        let implicit_measure = !circuit.has_measure();
        let working: Cow<'_, Circuit> = if implicit_measure {
            let mut copy = circuit.clone();
            copy.measure_all()?;
            debug!("No measurement in circuit, appending one to the working copy");
            Cow::Owned(copy)
        } else {
            Cow::Borrowed(circuit)
        };

        let evolution = self.engine.run(&working);
        debug!(
            "Evolved {} ops, measurement at {:?}",
            working.len(),
            evolution.measure_positions
        );

        let counts = self.sampler().sample(&evolution.state, shots)?;

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(SimulationResult {
            num_qubits: circuit.num_qubits(),
            gates: working.gates().to_vec(),
            implicit_measure,
            counts,
            execution_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// The pre-measurement state of `circuit`.
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Statevector> {
        self.check_size(circuit)?;
        Ok(self.engine.evolve(circuit))
    }

    fn check_size(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.config.max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max: self.config.max_qubits,
            });
        }
        Ok(())
    }

    fn sampler(&self) -> MeasurementSampler {
        MeasurementSampler::new()
            .with_tolerance(self.config.norm_tolerance)
            .with_seed(self.config.seed)
    }
}
