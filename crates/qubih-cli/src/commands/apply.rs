//! Apply command implementation.
//!
//! Applies a sequence of gates to a register. A single qubit goes through
//! [`Qubit::apply_gate`]; larger registers embed each gate at its target.

use anyhow::{Context, Result};
use tracing::{debug, info};

use qubih_core::linalg::qubit_dim;
use qubih_core::{QuantumSystem, Qubit, System};

use super::common::{GateSpec, ground_state, parse_amplitudes, parse_gate_spec, print_state};
use crate::OutputFormat;
use crate::config::Config;

/// Execute the apply command.
pub fn execute(
    config: &Config,
    gates: &[String],
    qubits: usize,
    state: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if qubits == 0 {
        anyhow::bail!("Register must have at least one qubit");
    }
    qubit_dim(qubits)?;

    let specs = gates
        .iter()
        .map(|g| parse_gate_spec(g.as_str()))
        .collect::<Result<Vec<GateSpec>>>()?;
    if let Some(bad) = specs.iter().find(|s| s.target >= qubits) {
        anyhow::bail!(
            "Gate {} targets qubit {} but the register has {qubits} qubit(s)",
            bad.kind,
            bad.target
        );
    }

    let psi = match state {
        Some(list) => parse_amplitudes(list)?,
        None => ground_state(qubits)?,
    };
    info!(gates = specs.len(), qubits, "applying gates");

    if qubits == 1 {
        let mut qubit = Qubit::from_state(psi).context("Invalid single-qubit state")?;
        for spec in &specs {
            debug!(gate = %spec.kind, "apply");
            qubit.apply_gate(&spec.operator())?;
        }
        print_state(qubit.state_vector(), format, config.simulation.tolerance)
    } else {
        let mut system = System::new(psi).context("Invalid initial state")?;
        for spec in &specs {
            debug!(gate = %spec.kind, target = spec.target, "apply");
            system
                .apply_local_op(&spec.operator(), spec.target, qubits)
                .with_context(|| format!("Failed to apply {}", spec.kind))?;
        }
        print_state(system.state_vector(), format, config.simulation.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_register_is_error() {
        let qubits = usize::BITS as usize;
        assert!(execute(&Config::default(), &[], qubits, None, OutputFormat::Json).is_err());
    }

    #[test]
    fn test_target_outside_register_rejected() {
        let gates = ["x@2".to_string()];
        assert!(execute(&Config::default(), &gates, 2, None, OutputFormat::Json).is_err());
    }
}
