//! Dense complex linear-algebra helpers.
//!
//! States and operators are held in `ndarray` containers. The matrix
//! exponential is delegated to `nalgebra`, whose `exp` implements the
//! scaling-and-squaring Padé approximant (Al-Mohy & Higham); the
//! conversion in and out is a plain element copy.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};

/// Absolute tolerance used for operator equality.
pub const EPSILON: f64 = 1e-10;

/// Relative and absolute tolerances for the "is this already unit norm"
/// check performed when a state is stored.
const NORM_RTOL: f64 = 1e-5;
const NORM_ATOL: f64 = 1e-8;

/// Complex zero.
pub const ZERO: Complex64 = Complex64::new(0.0, 0.0);
/// Complex one.
pub const ONE: Complex64 = Complex64::new(1.0, 0.0);
/// The imaginary unit.
pub const I: Complex64 = Complex64::new(0.0, 1.0);

/// The `dim × dim` identity matrix.
pub fn identity(dim: usize) -> Array2<Complex64> {
    Array2::eye(dim)
}

/// State-space dimension `2^n_qubits`, or an error if it overflows `usize`.
pub fn qubit_dim(n_qubits: usize) -> SimResult<usize> {
    u32::try_from(n_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .ok_or(SimError::TooManyQubits { n_qubits })
}

/// Euclidean norm of a complex vector.
pub fn norm<S>(v: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = Complex64>,
{
    v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
}

/// True if `n` is close enough to 1 that a state with this norm is left
/// untouched.
pub fn is_unit_norm(n: f64) -> bool {
    (n - 1.0).abs() <= NORM_ATOL + NORM_RTOL
}

/// Element-wise absolute comparison. Matrices of different shape are
/// never close.
pub fn allclose<S1, S2>(a: &ArrayBase<S1, Ix2>, b: &ArrayBase<S2, Ix2>, tol: f64) -> bool
where
    S1: Data<Elem = Complex64>,
    S2: Data<Elem = Complex64>,
{
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= tol)
}

/// Element-wise absolute comparison for vectors.
pub fn allclose_vec<S1, S2>(a: &ArrayBase<S1, Ix1>, b: &ArrayBase<S2, Ix1>, tol: f64) -> bool
where
    S1: Data<Elem = Complex64>,
    S2: Data<Elem = Complex64>,
{
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= tol)
}

/// Kronecker product `a ⊗ b`; `a` occupies the most significant index.
pub fn kron<S1, S2>(a: &ArrayBase<S1, Ix2>, b: &ArrayBase<S2, Ix2>) -> Array2<Complex64>
where
    S1: Data<Elem = Complex64>,
    S2: Data<Elem = Complex64>,
{
    ndarray::linalg::kron(a, b)
}

/// Conjugate transpose.
pub fn adjoint<S>(m: &ArrayBase<S, Ix2>) -> Array2<Complex64>
where
    S: Data<Elem = Complex64>,
{
    m.t().mapv(|z| z.conj())
}

/// Matrix exponential `exp(m)` of a square matrix.
///
/// The caller guarantees `m` is square.
pub fn expm<S>(m: &ArrayBase<S, Ix2>) -> Array2<Complex64>
where
    S: Data<Elem = Complex64>,
{
    let n = m.nrows();
    if n == 0 {
        return Array2::zeros((0, 0));
    }
    let dense = DMatrix::<Complex64>::from_fn(n, n, |i, j| m[[i, j]]);
    let exp = dense.exp();
    Array2::from_shape_fn((n, n), |(i, j)| exp[(i, j)])
}
