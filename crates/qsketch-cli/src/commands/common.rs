//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;

use qsketch_ir::{Circuit, GateOp};
use qsketch_sim::{SimulationResult, Statevector};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Load a circuit from a JSON file.
///
/// Every gate is validated on load; a file with an invalid gate is rejected
/// as a whole.
pub fn load_circuit(path: &Path) -> Result<Circuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "json" | "" => serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse circuit: {}", path.display())),
        other => anyhow::bail!("Unsupported circuit format: .{other} (expected .json)"),
    }
}

/// Print a gate sequence, one operation per line.
pub fn print_gates(gates: &[GateOp]) {
    if gates.is_empty() {
        println!("  (no gates)");
        return;
    }
    for (i, op) in gates.iter().enumerate() {
        println!("  {:>3}: {}", style(i).dim(), op);
    }
}

/// Print simulation results in the requested format.
pub fn emit_results(result: &SimulationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_results(result),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .context("Failed to serialize simulation result")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print simulation results as a histogram table.
pub fn print_results(result: &SimulationResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots()
    );

    if result.implicit_measure {
        println!("  {}", style("(measurement appended to all qubits)").dim());
    }

    let sorted = result.counts.sorted();
    let total = result.shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    println!(
        "\n  Execution time: {} ms",
        style(result.execution_time_ms).yellow()
    );
}

/// Print every basis state with its amplitude and probability.
pub fn print_state(state: &Statevector) {
    println!(
        "{} Statevector ({} qubits, norm² = {:.12}):",
        style("→").cyan().bold(),
        state.num_qubits(),
        state.norm_sqr()
    );

    for (index, amp) in state.amplitudes().iter().enumerate() {
        let prob = amp.norm_sqr();
        let line = format!(
            "  |{}⟩  {:>+.6} {:>+.6}i   p = {:.6}",
            state.index_to_bitstring(index),
            amp.re,
            amp.im,
            prob
        );
        if prob > 1e-12 {
            println!("{line}");
        } else {
            println!("{}", style(line).dim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_circuit_from_file() {
        let file = write_temp(
            ".json",
            r#"{"num_qubits": 2, "gates": [{"kind": "H", "target": 0}, {"kind": "CX", "control": 0, "target": 1}]}"#,
        );
        let circuit = load_circuit(file.path()).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_load_rejects_invalid_gate() {
        let file = write_temp(
            ".json",
            r#"{"num_qubits": 2, "gates": [{"kind": "CZ", "control": 1, "target": 1}]}"#,
        );
        let err = load_circuit(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("control and target must be different"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = load_circuit(Path::new("/nonexistent/circuit.json")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = write_temp(".qasm", "OPENQASM 3.0;");
        let err = load_circuit(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported circuit format"));
    }
}
