//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qsketch_sim::SimulationService;

use super::common::{OutputFormat, emit_results, load_circuit};
use crate::policy::Policy;

/// Execute the run command.
pub fn execute(
    input: &Path,
    shots: Option<u64>,
    format: OutputFormat,
    policy: &Policy,
    service: &SimulationService,
) -> Result<()> {
    let shots = policy.resolve_shots(shots)?;

    if format == OutputFormat::Table {
        println!(
            "{} Running {} ({} shots)",
            style("→").cyan().bold(),
            style(input.display()).green(),
            shots
        );
    }

    let circuit = load_circuit(input)?;
    policy.check_qubits(circuit.num_qubits())?;

    if format == OutputFormat::Table {
        println!(
            "  Loaded: {} qubits, {} ops",
            circuit.num_qubits(),
            circuit.len()
        );
    }

    let result = service.simulate(&circuit, shots)?;
    emit_results(&result, format)
}
