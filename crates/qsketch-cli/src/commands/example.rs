//! Example command implementation.

use anyhow::Result;
use console::style;

use qsketch_ir::Example;
use qsketch_sim::SimulationService;

use super::common::{OutputFormat, emit_results, print_gates};
use crate::policy::Policy;

/// Execute the example command.
pub fn execute(
    name: &str,
    qubits: Option<u32>,
    shots: Option<u64>,
    format: OutputFormat,
    policy: &Policy,
    service: &SimulationService,
) -> Result<()> {
    let example: Example = name.parse()?;
    let num_qubits = qubits.unwrap_or(policy.default_qubits);
    policy.check_qubits(num_qubits)?;
    let shots = policy.resolve_shots(shots)?;

    let circuit = example.build(num_qubits)?;

    if format == OutputFormat::Table {
        println!(
            "{} {} on {} qubits ({} shots)",
            style("→").cyan().bold(),
            style(example.title()).green(),
            num_qubits,
            shots
        );
        print_gates(circuit.gates());
    }

    let result = service.simulate(&circuit, shots)?;
    emit_results(&result, format)
}
