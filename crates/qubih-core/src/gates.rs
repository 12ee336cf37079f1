//! Standard single-qubit gates.
//!
//! Every factory returns a 2×2 [`Operator`]. [`GateKind`] names a gate
//! (plus its angle, for rotations) so callers can resolve user input
//! without string-keyed lookup tables.

use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;
use std::fmt;

use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::linalg::{I, ONE, ZERO};
use crate::operator::Operator;

fn gate(matrix: Array2<Complex64>) -> Operator {
    Operator::from_square(matrix)
}

fn re(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Identity gate.
pub fn identity() -> Operator {
    Operator::identity(2)
}

/// Pauli-X.
pub fn x() -> Operator {
    gate(array![[ZERO, ONE], [ONE, ZERO]])
}

/// Pauli-Y.
pub fn y() -> Operator {
    gate(array![[ZERO, -I], [I, ZERO]])
}

/// Pauli-Z.
pub fn z() -> Operator {
    gate(array![[ONE, ZERO], [ZERO, -ONE]])
}

/// Hadamard.
pub fn h() -> Operator {
    let s = re(FRAC_1_SQRT_2);
    gate(array![[s, s], [s, -s]])
}

/// S gate (sqrt(Z)).
pub fn s() -> Operator {
    gate(array![[ONE, ZERO], [ZERO, I]])
}

/// T gate (fourth root of Z).
pub fn t() -> Operator {
    phase(PI / 4.0)
}

/// Phase gate P(λ) = diag(1, e^{iλ}).
pub fn phase(lambda: f64) -> Operator {
    gate(array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, lambda)]])
}

/// Rotation about X: exp(-i θ X / 2).
pub fn rx(theta: f64) -> Operator {
    let c = re((theta / 2.0).cos());
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    gate(array![[c, s], [s, c]])
}

/// Rotation about Y: exp(-i θ Y / 2).
pub fn ry(theta: f64) -> Operator {
    let c = re((theta / 2.0).cos());
    let s = re((theta / 2.0).sin());
    gate(array![[c, -s], [s, c]])
}

/// Rotation about Z: exp(-i θ Z / 2).
pub fn rz(theta: f64) -> Operator {
    gate(array![
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
    ])
}

/// A named single-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// sqrt(Z).
    S,
    /// Fourth root of Z.
    T,
    /// Rotation about X.
    Rx(f64),
    /// Rotation about Y.
    Ry(f64),
    /// Rotation about Z.
    Rz(f64),
    /// Phase gate.
    P(f64),
}

impl GateKind {
    /// Resolve a gate name (case-insensitive). `theta` is used by the
    /// parameterised gates and ignored by the rest.
    pub fn from_name(name: &str, theta: f64) -> SimResult<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "i" | "id" => Self::I,
            "x" => Self::X,
            "y" => Self::Y,
            "z" => Self::Z,
            "h" => Self::H,
            "s" => Self::S,
            "t" => Self::T,
            "rx" => Self::Rx(theta),
            "ry" => Self::Ry(theta),
            "rz" => Self::Rz(theta),
            "p" | "phase" => Self::P(theta),
            _ => return Err(SimError::UnknownGate(name.to_string())),
        };
        Ok(kind)
    }

    /// Canonical gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::H => "H",
            Self::S => "S",
            Self::T => "T",
            Self::Rx(_) => "Rx",
            Self::Ry(_) => "Ry",
            Self::Rz(_) => "Rz",
            Self::P(_) => "P",
        }
    }

    /// True for gates that take an angle.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Rx(_) | Self::Ry(_) | Self::Rz(_) | Self::P(_))
    }

    /// The gate's matrix.
    pub fn operator(&self) -> Operator {
        match *self {
            Self::I => identity(),
            Self::X => x(),
            Self::Y => y(),
            Self::Z => z(),
            Self::H => h(),
            Self::S => s(),
            Self::T => t(),
            Self::Rx(theta) => rx(theta),
            Self::Ry(theta) => ry(theta),
            Self::Rz(theta) => rz(theta),
            Self::P(lambda) => phase(lambda),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rx(a) | Self::Ry(a) | Self::Rz(a) | Self::P(a) => {
                write!(f, "{}({a})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}
