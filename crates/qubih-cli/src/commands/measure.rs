//! Measure command implementation.
//!
//! Prepares a fresh qubit for every shot, applies the gate sequence and
//! samples one computational-basis outcome.

use anyhow::{Context, Result};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use qubih_core::{Operator, Qubit};

use super::common::{parse_gate_spec, print_counts};
use crate::OutputFormat;
use crate::config::Config;

/// Execute the measure command.
pub fn execute(
    config: &Config,
    gates: &[String],
    shots: Option<u32>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let mut circuit: Vec<Operator> = Vec::with_capacity(gates.len());
    for gate in gates {
        let spec = parse_gate_spec(gate)?;
        if spec.target != 0 {
            anyhow::bail!("measure works on a single qubit; '{gate}' targets qubit {}", spec.target);
        }
        circuit.push(spec.operator());
    }

    let shots = shots.unwrap_or(config.measurement.shots);
    if shots == 0 {
        anyhow::bail!("Number of shots must be greater than 0");
    }
    let seed = seed.or(config.measurement.seed);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    info!(shots, ?seed, gates = circuit.len(), "sampling");

    if format == OutputFormat::Table {
        println!(
            "{} Measuring {} shot(s)",
            style("→").cyan().bold(),
            shots
        );
    }

    let mut counts = [0u32; 2];
    for shot in 0..shots {
        let mut qubit = Qubit::new();
        for op in &circuit {
            qubit.apply_gate(op)?;
        }
        let outcome = qubit
            .measure(&mut rng)
            .with_context(|| format!("Measurement failed on shot {shot}"))?;
        counts[outcome] += 1;
    }

    print_counts(counts, shots, seed, format)
}
