//! Version command implementation.

use console::style;

use qsketch_ir::MAX_QUBITS_DENSE;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - statevector quantum circuit simulator",
        style("qsketch").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsketch-ir   Gates, circuits and example library");
    println!("  qsketch-sim  Statevector engine and measurement sampler");
    println!("  qsketch-cli  Command-line interface");
    println!();
    println!("Engine limit: {MAX_QUBITS_DENSE} qubits");
    println!("License:      {}", style("Apache-2.0").dim());
}
