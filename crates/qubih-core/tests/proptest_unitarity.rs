//! Property-based tests for norm preservation and algebraic identities.

use ndarray::Array1;
use num_complex::Complex64;
use proptest::prelude::*;
use qubih_core::linalg::{allclose_vec, norm};
use qubih_core::{GateKind, Hamiltonian, Operator, QuantumSystem, System, embed_local_op};

/// Random normalised state on `n_qubits` qubits.
fn arb_state(n_qubits: usize) -> impl Strategy<Value = Array1<Complex64>> {
    prop::collection::vec((-1.0_f64..1.0, -1.0_f64..1.0), 1 << n_qubits)
        .prop_filter("non-negligible norm", |amps| {
            amps.iter().map(|(re, im)| re * re + im * im).sum::<f64>() > 1e-3
        })
        .prop_map(|amps| {
            let v: Array1<Complex64> =
                amps.into_iter().map(|(re, im)| Complex64::new(re, im)).collect();
            let n = norm(&v);
            v / Complex64::new(n, 0.0)
        })
}

/// Random single-qubit gate, parameterised ones included.
fn arb_gate() -> impl Strategy<Value = GateKind> {
    let angle = -10.0_f64..10.0;
    prop_oneof![
        Just(GateKind::X),
        Just(GateKind::Y),
        Just(GateKind::Z),
        Just(GateKind::H),
        Just(GateKind::S),
        Just(GateKind::T),
        angle.clone().prop_map(GateKind::Rx),
        angle.clone().prop_map(GateKind::Ry),
        angle.clone().prop_map(GateKind::Rz),
        angle.prop_map(GateKind::P),
    ]
}

/// Random 2×2 complex matrix.
fn arb_operator() -> impl Strategy<Value = Operator> {
    prop::collection::vec((-5.0_f64..5.0, -5.0_f64..5.0), 4).prop_map(|e| {
        let z: Vec<Complex64> = e.into_iter().map(|(re, im)| Complex64::new(re, im)).collect();
        Operator::from_rows(&[&z[0..2], &z[2..4]]).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unitary_gates_preserve_norm(
        (n, state, gates) in (1_usize..=3).prop_flat_map(|n| (
            Just(n),
            arb_state(n),
            prop::collection::vec((arb_gate(), 0..n), 1..8),
        ))
    ) {
        let mut system = System::new(state).unwrap();
        for (gate, target) in gates {
            system.apply_local_op(&gate.operator(), target, n).unwrap();
        }
        prop_assert!((system.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn adjoint_is_an_involution(op in arb_operator()) {
        prop_assert_eq!(op.adjoint().adjoint(), op);
    }

    #[test]
    fn gate_then_adjoint_is_identity(state in arb_state(1), gate in arb_gate()) {
        let u = gate.operator();
        let out = u.adjoint().apply(&u.apply(&state).unwrap()).unwrap();
        prop_assert!(allclose_vec(&out, &state, 1e-9));
    }

    #[test]
    fn embedded_gates_are_unitary(gate in arb_gate(), n in 1_usize..=3, target_seed in 0_usize..3) {
        let target = target_seed % n;
        let full = embed_local_op(&gate.operator(), target, n).unwrap();
        prop_assert_eq!(full.dim(), 1 << n);
        prop_assert!(full.is_unitary(1e-10));
    }

    #[test]
    fn hermitian_part_generates_unitary_evolution(
        op in arb_operator(),
        state in arb_state(1),
        t in -3.0_f64..3.0,
    ) {
        // (A + A†) / 2 is always Hermitian.
        let herm = op.add(&op.adjoint()).unwrap().scale(Complex64::new(0.5, 0.0));
        prop_assert!(herm.is_hermitian(1e-12));
        let h = Hamiltonian::from_operator(herm);
        let out = h.evolve(&state, t, 1.0).unwrap();
        prop_assert!((norm(&out) - 1.0).abs() < 1e-9);
    }
}
