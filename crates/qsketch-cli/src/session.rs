//! Shared interactive session: one circuit, guarded by a lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info};

use qsketch_ir::{Circuit, Example, GateOp, IrError};
use qsketch_sim::{SimError, SimulationResult, SimulationService, Statevector};

use crate::policy::{Policy, PolicyError};

/// Errors from session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("No circuit defined")]
    NoCircuit,

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Ir(#[from] IrError),

    #[error(transparent)]
    Sim(#[from] SimError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The circuit being edited, plus the limits and simulator applied to it.
///
/// Every operation takes the lock for its whole read-modify-write, so
/// concurrent callers never observe a half-applied change.
#[derive(Debug)]
pub struct Session {
    policy: Policy,
    service: SimulationService,
    circuit: Mutex<Option<Circuit>>,
}

impl Session {
    /// Create a session with no circuit.
    pub fn new(policy: Policy, service: SimulationService) -> Self {
        Self {
            policy,
            service,
            circuit: Mutex::new(None),
        }
    }

    /// The active policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Option<Circuit>> {
        self.circuit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the circuit with an empty one on `num_qubits` qubits.
    pub fn reset(&self, num_qubits: u32) -> SessionResult<()> {
        self.policy.check_qubits(num_qubits)?;
        let fresh = Circuit::new(num_qubits)?;
        *self.lock() = Some(fresh);
        info!("Reset circuit to {} qubits", num_qubits);
        Ok(())
    }

    /// Replace the circuit with a prebuilt example.
    pub fn load_example(&self, example: Example, num_qubits: u32) -> SessionResult<Vec<GateOp>> {
        self.policy.check_qubits(num_qubits)?;
        let circuit = example.build(num_qubits)?;
        let gates = circuit.gates().to_vec();
        *self.lock() = Some(circuit);
        info!("Loaded example: {}", example);
        Ok(gates)
    }

    /// Append `op` to a circuit of `num_qubits` qubits.
    ///
    /// If the session has no circuit, or one of another size, a fresh circuit
    /// of `num_qubits` qubits takes its place. The replacement only happens
    /// when `op` is accepted.
    pub fn add_gate(&self, num_qubits: u32, op: GateOp) -> SessionResult<Vec<GateOp>> {
        self.policy.check_qubits(num_qubits)?;
        let mut guard = self.lock();

        match guard.as_mut() {
            Some(circuit) if circuit.num_qubits() == num_qubits => {
                circuit.append(op)?;
            }
            _ => {
                let mut fresh = Circuit::new(num_qubits)?;
                fresh.append(op)?;
                debug!("Register size changed, starting a new {}-qubit circuit", num_qubits);
                *guard = Some(fresh);
            }
        }

        debug!("Added gate: {}", op);
        Ok(guard.as_ref().map(|c| c.gates().to_vec()).unwrap_or_default())
    }

    /// Register size of the current circuit.
    pub fn num_qubits(&self) -> Option<u32> {
        self.lock().as_ref().map(Circuit::num_qubits)
    }

    /// A snapshot of the current circuit.
    pub fn circuit(&self) -> Option<Circuit> {
        self.lock().clone()
    }

    /// The current gate sequence, empty when there is no circuit.
    pub fn gates(&self) -> Vec<GateOp> {
        self.lock()
            .as_ref()
            .map(|c| c.gates().to_vec())
            .unwrap_or_default()
    }

    /// Simulate the current circuit.
    ///
    /// A circuit without a measurement is simulated with one appended. When
    /// the policy says so, that measurement is then kept in the session
    /// circuit; a failed simulation leaves the circuit as it was.
    pub fn simulate(&self, shots: u64) -> SessionResult<SimulationResult> {
        self.policy.check_shots(shots)?;

        let mut guard = self.lock();
        let circuit = guard.as_mut().ok_or(SessionError::NoCircuit)?;
        let result = self.service.simulate(circuit, shots)?;

        if result.implicit_measure && self.policy.persist_implicit_measure {
            circuit.measure_all()?;
            debug!("Persisted implicit measurement in session circuit");
        }
        Ok(result)
    }

    /// The pre-measurement state of the current circuit.
    pub fn statevector(&self) -> SessionResult<Statevector> {
        let snapshot = self.circuit().ok_or(SessionError::NoCircuit)?;
        Ok(self.service.statevector(&snapshot)?)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Policy::default(), SimulationService::new())
    }
}
