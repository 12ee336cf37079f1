//! Evolve command implementation.
//!
//! Builds a Pauli-sum Hamiltonian from `COEFF*PAULIS` terms and evolves a
//! state with the matrix-exponential solver.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qubih_core::linalg::qubit_dim;
use qubih_core::{ExpmSolver, Hamiltonian, QuantumSystem, System};

use super::common::{ground_state, parse_amplitudes, parse_pauli_term, print_state};
use crate::OutputFormat;
use crate::config::Config;

/// Execute the evolve command.
pub fn execute(
    config: &Config,
    terms: &[String],
    time: f64,
    state: Option<&str>,
    hbar: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let mut parsed = Vec::with_capacity(terms.len());
    let mut n_qubits = None;
    for term in terms {
        let (term, width) = parse_pauli_term(term)?;
        match n_qubits {
            None => n_qubits = Some(width),
            Some(n) if n != width => anyhow::bail!(
                "All terms must act on the same number of qubits (got {n} and {width})"
            ),
            Some(_) => {}
        }
        parsed.push(term);
    }
    let Some(n_qubits) = n_qubits else {
        anyhow::bail!("At least one --term is required");
    };

    let dim = qubit_dim(n_qubits)?;
    let psi = match state {
        Some(list) => parse_amplitudes(list)?,
        None => ground_state(n_qubits)?,
    };
    if psi.len() != dim {
        anyhow::bail!(
            "State has {} amplitudes but the Hamiltonian acts on {n_qubits} qubits ({dim} expected)",
            psi.len()
        );
    }

    let hamiltonian = Hamiltonian::from_pauli_terms(&parsed, n_qubits)
        .context("Failed to build Hamiltonian")?;

    let hbar = hbar.unwrap_or(config.simulation.reduced_planck_constant);
    let solver = ExpmSolver::new().with_reduced_planck_constant(hbar);
    info!(terms = parsed.len(), n_qubits, time, hbar, "evolving state");

    let mut system = System::new(psi)
        .context("Invalid initial state")?
        .with_hamiltonian(hamiltonian)
        .with_solver(solver);

    if format == OutputFormat::Table {
        println!(
            "{} Evolving {} qubit(s) for t = {} (ħ = {})",
            style("→").cyan().bold(),
            n_qubits,
            time,
            hbar
        );
    }

    let psi = system.evolve(time).context("Evolution failed")?;
    print_state(psi, format, config.simulation.tolerance)
}
