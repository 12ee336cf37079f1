//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - state-vector simulation of small qubit registers",
        style("qubih").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qubih-core  Operators, Hamiltonians, solvers, systems and qubits");
    println!("  qubih-cli   Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
