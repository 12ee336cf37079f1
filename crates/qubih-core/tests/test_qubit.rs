//! Tests for single-qubit gate application and measurement.

use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::array;
use num_complex::Complex64;
use qubih_core::linalg::allclose_vec;
use qubih_core::{
    ExpmSolver, GateKind, Hamiltonian, QuantumSystem, Qubit, SimError, gates,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const TOL: f64 = 1e-9;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn default_qubit_is_ket_zero() {
    let q = Qubit::default();
    assert_eq!(q.state_vector(), &array![c(1.0, 0.0), c(0.0, 0.0)]);
    assert_eq!(q.probabilities(), [1.0, 0.0]);
}

#[test]
fn from_state_normalizes() {
    let q = Qubit::from_state(array![c(1.0, 0.0), c(0.0, 1.0)]).unwrap();
    let psi = q.state_vector();
    assert!((psi[0] - c(FRAC_1_SQRT_2, 0.0)).norm() < TOL);
    assert!((psi[1] - c(0.0, FRAC_1_SQRT_2)).norm() < TOL);
}

#[test]
fn from_state_rejects_wrong_dimension() {
    let err = Qubit::from_state(array![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)]).unwrap_err();
    assert!(matches!(
        err,
        SimError::WrongDimension {
            expected: 2,
            got: 3
        }
    ));
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

#[test]
fn pauli_x_flips_ket_zero() {
    let mut q = Qubit::new();
    let psi = q.apply_gate(&gates::x()).unwrap();
    assert!(allclose_vec(psi, &array![c(0.0, 0.0), c(1.0, 0.0)], TOL));
}

#[test]
fn hadamard_makes_plus_state() {
    let mut q = Qubit::new();
    let psi = q.apply_gate(&gates::h()).unwrap();
    let expected = array![c(FRAC_1_SQRT_2, 0.0), c(FRAC_1_SQRT_2, 0.0)];
    assert!(allclose_vec(psi, &expected, TOL));
}

#[test]
fn self_inverse_gates_round_trip() {
    let start = array![c(0.6, 0.0), c(0.0, 0.8)];
    for kind in [GateKind::X, GateKind::Y, GateKind::Z, GateKind::H] {
        let mut q = Qubit::from_state(start.clone()).unwrap();
        let gate = kind.operator();
        q.apply_gate(&gate).unwrap();
        q.apply_gate(&gate).unwrap();
        assert!(allclose_vec(q.state_vector(), &start, TOL), "{kind} failed");
    }
}

#[test]
fn rotation_then_inverse_round_trip() {
    let start = array![c(0.6, 0.0), c(0.0, 0.8)];
    let mut q = Qubit::from_state(start.clone()).unwrap();
    q.apply_gate(&gates::rx(0.7)).unwrap();
    q.apply_gate(&gates::rx(0.7).adjoint()).unwrap();
    assert!(allclose_vec(q.state_vector(), &start, TOL));
}

#[test]
fn wrong_size_gate_is_dimension_error() {
    let mut q = Qubit::new();
    let big = gates::x().tensor(&gates::x());
    assert!(matches!(
        q.apply_gate(&big),
        Err(SimError::DimensionMismatch { .. })
    ));
}

#[test]
fn qubit_evolves_when_configured() {
    let mut q = Qubit::new()
        .with_hamiltonian(Hamiltonian::from_operator(gates::x()))
        .with_solver(ExpmSolver::new());
    let psi = q.evolve(std::f64::consts::FRAC_PI_2).unwrap();
    assert!((psi[1] - c(0.0, -1.0)).norm() < TOL);
}

#[test]
fn unconfigured_qubit_cannot_evolve() {
    let mut q = Qubit::new();
    assert!(q.evolve(1.0).is_err());
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

#[test]
fn measuring_basis_state_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut q = Qubit::new();
    q.apply_gate(&gates::x()).unwrap();
    for _ in 0..100 {
        assert_eq!(q.measure(&mut rng).unwrap(), 1);
    }
}

#[test]
fn plus_state_statistics_and_collapse() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let trials = 10_000;
    let mut zeros = 0usize;

    for _ in 0..trials {
        let mut q = Qubit::from_state(array![
            c(FRAC_1_SQRT_2, 0.0),
            c(FRAC_1_SQRT_2, 0.0)
        ])
        .unwrap();
        let outcome = q.measure(&mut rng).unwrap();
        assert!(outcome == 0 || outcome == 1);

        let mut expected = array![c(0.0, 0.0), c(0.0, 0.0)];
        expected[outcome] = c(1.0, 0.0);
        assert_eq!(q.state_vector(), &expected);

        if outcome == 0 {
            zeros += 1;
        }
    }

    let freq = zeros as f64 / trials as f64;
    assert!((freq - 0.5).abs() < 0.03, "outcome-0 frequency {freq}");
}

#[test]
fn measurement_discards_phase() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut q = Qubit::from_state(array![c(0.0, 0.0), c(0.0, -1.0)]).unwrap();
    assert_eq!(q.measure(&mut rng).unwrap(), 1);
    assert_eq!(q.state_vector(), &array![c(0.0, 0.0), c(1.0, 0.0)]);
}

#[test]
fn repeated_measurement_is_stable() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut q = Qubit::new();
    q.apply_gate(&gates::ry(1.1)).unwrap();
    let first = q.measure(&mut rng).unwrap();
    for _ in 0..20 {
        assert_eq!(q.measure(&mut rng).unwrap(), first);
    }
}

#[test]
fn same_seed_gives_same_outcomes() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| {
                let mut q = Qubit::new();
                q.apply_gate(&gates::h()).unwrap();
                q.measure(&mut rng).unwrap()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn degenerate_state_cannot_be_measured() {
    // A non-unitary operator can drive the state to zero.
    let mut q = Qubit::new();
    q.apply_gate(&gates::x().subtract(&gates::x()).unwrap())
        .unwrap();
    assert!(matches!(
        q.measure(&mut StdRng::seed_from_u64(1)),
        Err(SimError::Sampling(_))
    ));
}
