//! Examples command implementation.

use console::style;

use qsketch_ir::Example;

/// Execute the examples command.
pub fn execute() {
    println!("{}", style("Available examples:").bold());
    println!();
    for example in Example::ALL {
        println!(
            "  {:<8} {}",
            style(example.name()).cyan(),
            example.title()
        );
    }
    println!();
    println!("Run one with: qsketch example <name> [--qubits N] [--shots N]");
}
