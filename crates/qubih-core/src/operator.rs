//! Linear operators acting on state vectors.
//!
//! An [`Operator`] is an immutable complex square matrix. Every algebraic
//! method returns a fresh value; nothing is mutated in place.
//!
//! Composition is asymmetric: an operator composed with another operator
//! is again an operator, while an operator applied to a bare vector or
//! matrix yields a bare array. Both flavours are reachable either through
//! the dedicated methods ([`Operator::compose`], [`Operator::apply`],
//! [`Operator::apply_matrix`]) or through the tagged [`Operand`] /
//! [`Product`] pair accepted by [`Operator::multiply`].
//!
//! # Example
//!
//! ```rust
//! use qubih_core::gates;
//!
//! let x = gates::x();
//! let xx = x.compose(&x).unwrap();
//! assert!(xx.approx_eq(&gates::identity(), 1e-12));
//! assert!(x.is_hermitian(1e-10) && x.is_unitary(1e-10));
//! ```

use std::fmt;
use std::ops::Neg;

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::linalg::{self, EPSILON};

/// A general linear operator on an N-dimensional state space.
#[derive(Debug, Clone)]
pub struct Operator {
    matrix: Array2<Complex64>,
}

/// Right-hand operand accepted by the generic algebra entry points.
#[derive(Debug, Clone)]
pub enum Operand {
    /// Another operator.
    Operator(Operator),
    /// A bare state vector.
    Vector(Array1<Complex64>),
    /// A bare matrix.
    Matrix(Array2<Complex64>),
    /// A complex scalar.
    Scalar(Complex64),
}

impl Operand {
    /// Name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Operator(_) => "Operator",
            Self::Vector(_) => "vector",
            Self::Matrix(_) => "matrix",
            Self::Scalar(_) => "scalar",
        }
    }
}

impl From<Operator> for Operand {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<Array1<Complex64>> for Operand {
    fn from(v: Array1<Complex64>) -> Self {
        Self::Vector(v)
    }
}

impl From<Array2<Complex64>> for Operand {
    fn from(m: Array2<Complex64>) -> Self {
        Self::Matrix(m)
    }
}

impl From<Complex64> for Operand {
    fn from(z: Complex64) -> Self {
        Self::Scalar(z)
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Self::Scalar(Complex64::new(x, 0.0))
    }
}

/// Result of [`Operator::multiply`].
#[derive(Debug, Clone)]
pub enum Product {
    /// Operator ∘ Operator, or a scaled operator.
    Operator(Operator),
    /// Operator applied to a bare vector.
    Vector(Array1<Complex64>),
    /// Operator applied to a bare matrix.
    Matrix(Array2<Complex64>),
}

impl Product {
    /// The operator result, if this product is one.
    pub fn into_operator(self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// The vector result, if this product is one.
    pub fn into_vector(self) -> Option<Array1<Complex64>> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// The bare-matrix result, if this product is one.
    pub fn into_matrix(self) -> Option<Array2<Complex64>> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

impl Operator {
    /// Wrap a square matrix.
    pub fn new(matrix: Array2<Complex64>) -> SimResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(SimError::NotSquare { rows, cols });
        }
        Ok(Self { matrix })
    }

    /// Build an operator from row slices.
    pub fn from_rows(rows: &[&[Complex64]]) -> SimResult<Self> {
        let n = rows.len();
        let cols = rows.first().map_or(0, |r| r.len());
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(SimError::NotSquare {
                rows: n,
                cols: bad.len(),
            });
        }
        let flat: Vec<Complex64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        let matrix = Array2::from_shape_vec((n, cols), flat).map_err(|_| SimError::NotSquare {
            rows: n,
            cols,
        })?;
        Self::new(matrix)
    }

    /// The identity operator on a `dim`-dimensional space.
    pub fn identity(dim: usize) -> Self {
        Self {
            matrix: linalg::identity(dim),
        }
    }

    /// Wrap a matrix already known to be square.
    pub(crate) fn from_square(matrix: Array2<Complex64>) -> Self {
        debug_assert_eq!(matrix.nrows(), matrix.ncols());
        Self { matrix }
    }

    /// Dimension N of the N×N matrix.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Consume the operator, returning its matrix.
    pub fn into_matrix(self) -> Array2<Complex64> {
        self.matrix
    }

    /// Operator composition `self · other`.
    pub fn compose(&self, other: &Operator) -> SimResult<Operator> {
        self.check_square_shape("compose", other.shape())?;
        Ok(Self::from_square(self.matrix.dot(&other.matrix)))
    }

    /// Apply the operator to a bare vector, returning a bare vector.
    pub fn apply(&self, state: &Array1<Complex64>) -> SimResult<Array1<Complex64>> {
        if state.len() != self.matrix.ncols() {
            return Err(SimError::DimensionMismatch {
                operation: "apply",
                lhs: self.matrix.shape().to_vec(),
                rhs: state.shape().to_vec(),
            });
        }
        Ok(self.matrix.dot(state))
    }

    /// Multiply by a bare matrix, returning a bare matrix.
    pub fn apply_matrix(&self, m: &Array2<Complex64>) -> SimResult<Array2<Complex64>> {
        if m.nrows() != self.matrix.ncols() {
            return Err(SimError::DimensionMismatch {
                operation: "apply_matrix",
                lhs: self.matrix.shape().to_vec(),
                rhs: m.shape().to_vec(),
            });
        }
        Ok(self.matrix.dot(m))
    }

    /// Multiply every entry by `scalar`.
    pub fn scale(&self, scalar: Complex64) -> Operator {
        Self::from_square(&self.matrix * scalar)
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Operator) -> SimResult<Operator> {
        self.check_same_shape("+", other.shape())?;
        Ok(Self::from_square(&self.matrix + &other.matrix))
    }

    /// Element-wise difference.
    pub fn subtract(&self, other: &Operator) -> SimResult<Operator> {
        self.check_same_shape("-", other.shape())?;
        Ok(Self::from_square(&self.matrix - &other.matrix))
    }

    /// Element-wise negation.
    pub fn negate(&self) -> Operator {
        Self::from_square(self.matrix.mapv(|z| -z))
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Operator {
        Self::from_square(linalg::adjoint(&self.matrix))
    }

    /// Alias for [`Operator::adjoint`].
    pub fn dagger(&self) -> Operator {
        self.adjoint()
    }

    /// Tensor (Kronecker) product `self ⊗ other`.
    pub fn tensor(&self, other: &Operator) -> Operator {
        Self::from_square(linalg::kron(&self.matrix, &other.matrix))
    }

    /// Generic multiplication preserving the operator/array asymmetry.
    pub fn multiply(&self, rhs: impl Into<Operand>) -> SimResult<Product> {
        match rhs.into() {
            Operand::Operator(op) => self.compose(&op).map(Product::Operator),
            Operand::Vector(v) => self.apply(&v).map(Product::Vector),
            Operand::Matrix(m) => self.apply_matrix(&m).map(Product::Matrix),
            Operand::Scalar(z) => Ok(Product::Operator(self.scale(z))),
        }
    }

    /// Element-wise sum with an operator or bare square matrix.
    pub fn add_operand(&self, rhs: impl Into<Operand>) -> SimResult<Operator> {
        let other = Self::coerce("+", rhs.into())?;
        self.add(&other)
    }

    /// Element-wise difference with an operator or bare square matrix.
    pub fn subtract_operand(&self, rhs: impl Into<Operand>) -> SimResult<Operator> {
        let other = Self::coerce("-", rhs.into())?;
        self.subtract(&other)
    }

    /// True if the operator equals its adjoint within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        linalg::allclose(&self.matrix, &linalg::adjoint(&self.matrix), tol)
    }

    /// True if `adjoint(self) · self` is the identity within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let product = linalg::adjoint(&self.matrix).dot(&self.matrix);
        linalg::allclose(&product, &linalg::identity(self.dim()), tol)
    }

    /// Entry-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: &Operator, tol: f64) -> bool {
        linalg::allclose(&self.matrix, &other.matrix, tol)
    }

    fn coerce(operation: &'static str, operand: Operand) -> SimResult<Operator> {
        match operand {
            Operand::Operator(op) => Ok(op),
            Operand::Matrix(m) => Operator::new(m),
            other => Err(SimError::UnsupportedOperand {
                operation,
                operand: other.type_name(),
            }),
        }
    }

    fn check_same_shape(&self, operation: &'static str, rhs: (usize, usize)) -> SimResult<()> {
        if self.shape() != rhs {
            return Err(SimError::DimensionMismatch {
                operation,
                lhs: self.matrix.shape().to_vec(),
                rhs: vec![rhs.0, rhs.1],
            });
        }
        Ok(())
    }

    fn check_square_shape(&self, operation: &'static str, rhs: (usize, usize)) -> SimResult<()> {
        if self.matrix.ncols() != rhs.0 {
            return Err(SimError::DimensionMismatch {
                operation,
                lhs: self.matrix.shape().to_vec(),
                rhs: vec![rhs.0, rhs.1],
            });
        }
        Ok(())
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPSILON)
    }
}

impl Neg for Operator {
    type Output = Operator;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &Operator {
    type Output = Operator;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.matrix.rows() {
            let cells: Vec<String> = row.iter().map(|z| format!("{z:.4}")).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
