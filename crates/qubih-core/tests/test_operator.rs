//! Tests for operator algebra and classification.

use ndarray::array;
use num_complex::Complex64;
use qubih_core::gates;
use qubih_core::{ErrorKind, Operand, Operator, Product, SimError};

const TOL: f64 = 1e-10;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn paulis_and_hadamard_are_hermitian_and_unitary() {
    for (name, g) in [
        ("X", gates::x()),
        ("Y", gates::y()),
        ("Z", gates::z()),
        ("H", gates::h()),
    ] {
        assert!(g.is_hermitian(TOL), "{name} should be Hermitian");
        assert!(g.is_unitary(TOL), "{name} should be unitary");
    }
}

#[test]
fn s_gate_is_unitary_but_not_hermitian() {
    let s = gates::s();
    assert!(s.is_unitary(TOL));
    assert!(!s.is_hermitian(TOL));
}

#[test]
fn scaled_pauli_is_hermitian_not_unitary() {
    let op = gates::z().scale(c(2.0, 0.0));
    assert!(op.is_hermitian(TOL));
    assert!(!op.is_unitary(TOL));
}

// ---------------------------------------------------------------------------
// Adjoint
// ---------------------------------------------------------------------------

#[test]
fn adjoint_is_idempotent() {
    let op = Operator::from_rows(&[&[c(1.0, 2.0), c(0.0, -1.0)], &[c(3.0, 0.5), c(-2.0, 0.0)]])
        .unwrap();
    assert_eq!(op.adjoint().adjoint(), op);
}

#[test]
fn adjoint_of_rotation_is_inverse() {
    let r = gates::ry(0.8);
    assert_eq!(r.dagger(), gates::ry(-0.8));
    assert_eq!(r.compose(&r.dagger()).unwrap(), gates::identity());
}

// ---------------------------------------------------------------------------
// Composition asymmetry
// ---------------------------------------------------------------------------

#[test]
fn operator_times_operator_is_operator() {
    let product = gates::h().multiply(gates::z()).unwrap();
    let op = product.into_operator().expect("operator result");
    // HZH = X
    assert_eq!(op.compose(&gates::h()).unwrap(), gates::x());
}

#[test]
fn operator_times_vector_is_bare_vector() {
    let product = gates::x().multiply(Operand::Vector(array![c(1.0, 0.0), c(0.0, 0.0)]));
    match product.unwrap() {
        Product::Vector(v) => assert_eq!(v, array![c(0.0, 0.0), c(1.0, 0.0)]),
        other => panic!("expected a bare vector, got {other:?}"),
    }
}

#[test]
fn operator_times_matrix_is_bare_matrix() {
    let m = array![[c(1.0, 0.0), c(2.0, 0.0)], [c(3.0, 0.0), c(4.0, 0.0)]];
    let out = gates::x()
        .multiply(m)
        .unwrap()
        .into_matrix()
        .expect("matrix result");
    // X swaps rows.
    assert_eq!(out[[0, 0]], c(3.0, 0.0));
    assert_eq!(out[[1, 1]], c(2.0, 0.0));
}

// ---------------------------------------------------------------------------
// Sums and errors
// ---------------------------------------------------------------------------

#[test]
fn sum_of_projectors_is_identity() {
    let p0 = Operator::from_rows(&[&[c(1.0, 0.0), c(0.0, 0.0)], &[c(0.0, 0.0), c(0.0, 0.0)]])
        .unwrap();
    let p1 = gates::identity().subtract(&p0).unwrap();
    assert_eq!(p0.add(&p1).unwrap(), gates::identity());
}

#[test]
fn add_bare_matrix_operand() {
    let sum = gates::x()
        .add_operand(array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]])
        .unwrap();
    assert_eq!(sum.matrix()[[0, 0]], c(1.0, 0.0));
    assert_eq!(sum.matrix()[[0, 1]], c(1.0, 0.0));
}

#[test]
fn add_scalar_operand_is_type_error() {
    let err = gates::x().add_operand(c(1.0, 0.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(
        err.to_string(),
        "Unsupported operand for +: 'Operator' and 'scalar'"
    );
}

#[test]
fn compose_mismatched_dimensions_is_dimension_error() {
    let err = gates::x().compose(&Operator::identity(4)).unwrap_err();
    assert!(matches!(err, SimError::DimensionMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Dimension);
}

#[test]
fn negate_matches_scale_by_minus_one() {
    let y = gates::y();
    assert_eq!(y.negate(), y.scale(c(-1.0, 0.0)));
    assert_eq!(-y.clone(), y.negate());
}

#[test]
fn equality_uses_absolute_tolerance() {
    let h = gates::h();
    let s = std::f64::consts::FRAC_1_SQRT_2 + 5e-11;
    let approx = Operator::from_rows(&[&[c(s, 0.0), c(s, 0.0)], &[c(s, 0.0), c(-s, 0.0)]]).unwrap();
    assert_eq!(h, approx);
    assert_ne!(h, gates::x());
    assert_ne!(h, Operator::identity(4));
}
