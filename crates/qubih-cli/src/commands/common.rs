//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use console::style;
use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;

use qubih_core::hamiltonian::{PauliString, PauliTerm};
use qubih_core::linalg::qubit_dim;
use qubih_core::{GateKind, Operator};

use crate::OutputFormat;

/// A gate with its target qubit, parsed from `NAME`, `NAME(θ)` or `NAME(θ)@TARGET`.
#[derive(Debug, Clone, PartialEq)]
pub struct GateSpec {
    pub kind: GateKind,
    pub target: usize,
}

impl GateSpec {
    pub fn operator(&self) -> Operator {
        self.kind.operator()
    }
}

/// Parse a gate specification.
pub fn parse_gate_spec(spec: &str) -> Result<GateSpec> {
    let spec = spec.trim();
    let (gate, target) = match spec.rsplit_once('@') {
        Some((gate, target)) => {
            let target = target
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid target qubit in '{spec}'"))?;
            (gate.trim(), target)
        }
        None => (spec, 0),
    };

    let (name, angle) = match gate.split_once('(') {
        Some((name, rest)) => {
            let Some(arg) = rest.strip_suffix(')') else {
                anyhow::bail!("Unclosed parenthesis in gate '{spec}'");
            };
            let theta = arg
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid angle in gate '{spec}'"))?;
            (name.trim(), Some(theta))
        }
        None => (gate, None),
    };

    let kind = GateKind::from_name(name, angle.unwrap_or(0.0))?;
    match (kind.is_parameterized(), angle) {
        (true, None) => anyhow::bail!("Gate '{}' requires an angle, e.g. {name}(0.5)", kind.name()),
        (false, Some(_)) => anyhow::bail!("Gate '{}' takes no angle", kind.name()),
        _ => {}
    }

    Ok(GateSpec { kind, target })
}

/// Parse a Hamiltonian term `COEFF*PAULIS` (or bare `PAULIS`, coefficient 1).
///
/// Returns the term together with the label length, which fixes the
/// number of qubits the term was written for.
pub fn parse_pauli_term(term: &str) -> Result<(PauliTerm, usize)> {
    let term = term.trim();
    let (coeff, label) = match term.split_once('*') {
        Some((coeff, label)) => {
            let coeff = coeff
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid coefficient in term '{term}'"))?;
            (coeff, label.trim())
        }
        None => (1.0, term),
    };

    if label.is_empty() {
        anyhow::bail!("Term '{term}' has no Pauli operators");
    }
    let pauli = PauliString::from_label(label).ok_or_else(|| {
        anyhow::anyhow!("Invalid Pauli string '{label}': expected only I, X, Y, Z")
    })?;

    Ok((PauliTerm::new(coeff, pauli), label.chars().count()))
}

/// Parse a comma-separated amplitude list such as `0.6,0.8i` or `1,-1+0.5i`.
pub fn parse_amplitudes(list: &str) -> Result<Array1<Complex64>> {
    list.split(',')
        .map(|a| {
            let a = a.trim();
            a.parse::<Complex64>()
                .map_err(|e| anyhow::anyhow!("Invalid amplitude '{a}': {e}"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Array1::from_vec)
}

/// `|0...0⟩` on `n_qubits` qubits.
pub fn ground_state(n_qubits: usize) -> Result<Array1<Complex64>> {
    let dim = qubit_dim(n_qubits)?;
    let mut psi = Array1::from_elem(dim, Complex64::new(0.0, 0.0));
    psi[0] = Complex64::new(1.0, 0.0);
    Ok(psi)
}

/// Basis label for an index: a bitstring when the qubit count is known.
pub fn basis_label(index: usize, n_qubits: Option<usize>) -> String {
    match n_qubits {
        Some(0) | None => index.to_string(),
        Some(n) => format!("{index:0n$b}"),
    }
}

#[derive(Debug, Serialize)]
struct AmplitudeEntry {
    basis: String,
    re: f64,
    im: f64,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct StateReport {
    dimension: usize,
    qubits: Option<usize>,
    norm: f64,
    amplitudes: Vec<AmplitudeEntry>,
}

fn state_report(state: &Array1<Complex64>) -> StateReport {
    let dim = state.len();
    let qubits = dim.is_power_of_two().then(|| dim.trailing_zeros() as usize);
    StateReport {
        dimension: dim,
        qubits,
        norm: qubih_core::linalg::norm(state),
        amplitudes: state
            .iter()
            .enumerate()
            .map(|(i, z)| AmplitudeEntry {
                basis: basis_label(i, qubits),
                re: z.re,
                im: z.im,
                probability: z.norm_sqr(),
            })
            .collect(),
    }
}

/// Print a state vector as a table or JSON.
///
/// Table output hides amplitudes whose magnitude is below `tolerance`.
pub fn print_state(state: &Array1<Complex64>, format: OutputFormat, tolerance: f64) -> Result<()> {
    let report = state_report(state);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("JSON serialization failed")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            println!(
                "\n{} State ({} amplitudes, norm {:.6}):",
                style("✓").green().bold(),
                report.dimension,
                report.norm
            );
            for entry in &report.amplitudes {
                if entry.probability.sqrt() < tolerance {
                    continue;
                }
                let bar: String = "█".repeat((entry.probability * 50.0).round() as usize);
                println!(
                    "  |{}⟩: {:>+10.6} {:>+10.6}i  p={:.4} {}",
                    style(&entry.basis).cyan(),
                    entry.re,
                    entry.im,
                    entry.probability,
                    style(bar).green()
                );
            }
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct CountsReport {
    shots: u32,
    seed: Option<u64>,
    counts: [u32; 2],
}

/// Print measurement counts as a table or JSON.
pub fn print_counts(counts: [u32; 2], shots: u32, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let report = CountsReport {
        shots,
        seed,
        counts,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("JSON serialization failed")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            println!(
                "\n{} Results ({} shots):",
                style("✓").green().bold(),
                report.shots
            );
            for (outcome, count) in report.counts.iter().enumerate() {
                let prob = f64::from(*count) / f64::from(report.shots) * 100.0;
                let bar: String = "█".repeat((prob / 2.0).round() as usize);
                println!(
                    "  {}: {:>6} ({:>5.2}%) {}",
                    style(outcome).cyan(),
                    count,
                    prob,
                    style(bar).green()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qubih_core::hamiltonian::PauliOp;

    #[test]
    fn test_parse_plain_gate() {
        let spec = parse_gate_spec("H").unwrap();
        assert_eq!(spec.kind, GateKind::H);
        assert_eq!(spec.target, 0);
    }

    #[test]
    fn test_parse_rotation_with_target() {
        let spec = parse_gate_spec(" rx(0.25)@2 ").unwrap();
        assert_eq!(spec.kind, GateKind::Rx(0.25));
        assert_eq!(spec.target, 2);
    }

    #[test]
    fn test_parse_gate_errors() {
        assert!(parse_gate_spec("rx").is_err());
        assert!(parse_gate_spec("x(0.1)").is_err());
        assert!(parse_gate_spec("ry(0.1").is_err());
        assert!(parse_gate_spec("ry(abc)").is_err());
        assert!(parse_gate_spec("h@q1").is_err());
        assert!(parse_gate_spec("foo").is_err());
    }

    #[test]
    fn test_parse_pauli_term() {
        let (term, len) = parse_pauli_term("-1.0*ZZ").unwrap();
        assert!((term.coeff + 1.0).abs() < f64::EPSILON);
        assert_eq!(term.pauli.ops(), &[(0, PauliOp::Z), (1, PauliOp::Z)]);
        assert_eq!(len, 2);

        let (term, len) = parse_pauli_term("IX").unwrap();
        assert!((term.coeff - 1.0).abs() < f64::EPSILON);
        assert_eq!(term.pauli.ops(), &[(1, PauliOp::X)]);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_parse_pauli_term_errors() {
        assert!(parse_pauli_term("abc*X").is_err());
        assert!(parse_pauli_term("0.5*XQ").is_err());
        assert!(parse_pauli_term("0.5*").is_err());
    }

    #[test]
    fn test_parse_amplitudes() {
        let psi = parse_amplitudes("0.6, 0.8i").unwrap();
        assert_eq!(psi.len(), 2);
        assert_eq!(psi[0], Complex64::new(0.6, 0.0));
        assert_eq!(psi[1], Complex64::new(0.0, 0.8));

        let psi = parse_amplitudes("1,-1+0.5i").unwrap();
        assert_eq!(psi[1], Complex64::new(-1.0, 0.5));

        assert!(parse_amplitudes("1,,0").is_err());
    }

    #[test]
    fn test_ground_state_and_labels() {
        let psi = ground_state(3).unwrap();
        assert_eq!(psi.len(), 8);
        assert_eq!(psi[0], Complex64::new(1.0, 0.0));
        assert_eq!(basis_label(5, Some(3)), "101");
        assert_eq!(basis_label(1, Some(1)), "1");
        assert_eq!(basis_label(2, None), "2");
    }

    #[test]
    fn test_ground_state_rejects_overflowing_register() {
        let err = ground_state(usize::BITS as usize).unwrap_err();
        assert!(err.to_string().contains("overflows"));
        assert!(ground_state(usize::MAX).is_err());
    }

    #[test]
    fn test_state_report_qubits() {
        let report = state_report(&ground_state(2).unwrap());
        assert_eq!(report.qubits, Some(2));
        assert_eq!(report.amplitudes[0].basis, "00");
        assert!((report.norm - 1.0).abs() < 1e-12);
    }
}
