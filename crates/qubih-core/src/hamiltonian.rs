//! Hamiltonians and exact time evolution.
//!
//! A [`Hamiltonian`] is an [`Operator`] used as the generator of the
//! unitary family
//!
//!   U(t) = exp(-i · H · t / ħ)
//!
//! The propagator is computed with a matrix exponential, never a
//! truncated series, so there is no discretisation error for a
//! time-independent generator.
//!
//! Hamiltonians can be given as a dense matrix or assembled from a sum of
//! weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! # Example
//!
//! ```rust
//! use qubih_core::hamiltonian::{Hamiltonian, PauliTerm};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::from_pauli_terms(
//!     &[PauliTerm::zz(0, 1, -1.0), PauliTerm::x(0, 0.5)],
//!     2,
//! )
//! .unwrap();
//! assert_eq!(h.dim(), 4);
//! assert!(h.is_hermitian(1e-10));
//! ```

use std::ops::Deref;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::linalg::{self, EPSILON, I, ONE, ZERO};
use crate::operator::Operator;

/// Generator of time evolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Hamiltonian {
    op: Operator,
}

impl Hamiltonian {
    /// Wrap a square matrix.
    pub fn new(matrix: Array2<Complex64>) -> SimResult<Self> {
        Ok(Self::from_operator(Operator::new(matrix)?))
    }

    /// Use an existing operator as generator.
    ///
    /// Non-Hermitian generators are accepted but produce non-unitary
    /// propagators; a warning is logged.
    pub fn from_operator(op: Operator) -> Self {
        if !op.is_hermitian(EPSILON) {
            warn!(dim = op.dim(), "Hamiltonian is not Hermitian; evolution will not be unitary");
        }
        Self { op }
    }

    /// Assemble the dense matrix of `Σ c_k · P_k` on `n_qubits` qubits.
    ///
    /// Qubit 0 is the leftmost (most significant) tensor factor, matching
    /// [`crate::system::embed_local_op`].
    pub fn from_pauli_terms(terms: &[PauliTerm], n_qubits: usize) -> SimResult<Self> {
        if terms.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        let dim = linalg::qubit_dim(n_qubits)?;
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for term in terms {
            if let Some(q) = term.pauli.max_qubit() {
                if q >= n_qubits {
                    return Err(SimError::QubitOutOfRange {
                        target: q,
                        total_qubits: n_qubits,
                    });
                }
            }
            let p = term.pauli.to_matrix(n_qubits);
            matrix.scaled_add(Complex64::new(term.coeff, 0.0), &p);
        }
        debug!(n_terms = terms.len(), n_qubits, "assembled Pauli-sum Hamiltonian");
        Ok(Self::from_operator(Operator::from_square(matrix)))
    }

    /// The generator as a plain operator.
    pub fn as_operator(&self) -> &Operator {
        &self.op
    }

    /// Consume the Hamiltonian, returning its operator.
    pub fn into_operator(self) -> Operator {
        self.op
    }

    /// U(t) = exp(-i · H · t / ħ).
    pub fn propagator(&self, t: f64, reduced_planck_constant: f64) -> SimResult<Operator> {
        if !reduced_planck_constant.is_finite() || reduced_planck_constant <= 0.0 {
            return Err(SimError::InvalidPlanckConstant(reduced_planck_constant));
        }
        let factor = -I * (t / reduced_planck_constant);
        let generator = self.op.matrix() * factor;
        Ok(Operator::from_square(linalg::expm(&generator)))
    }

    /// Evolve `state` for time `t`, returning the new state.
    ///
    /// The Hamiltonian itself is left untouched.
    pub fn evolve(
        &self,
        state: &Array1<Complex64>,
        t: f64,
        reduced_planck_constant: f64,
    ) -> SimResult<Array1<Complex64>> {
        debug!(dim = self.op.dim(), t, reduced_planck_constant, "evolving state");
        self.propagator(t, reduced_planck_constant)?.apply(state)
    }
}

impl Deref for Hamiltonian {
    type Target = Operator;

    fn deref(&self) -> &Self::Target {
        &self.op
    }
}

impl AsRef<Operator> for Hamiltonian {
    fn as_ref(&self) -> &Operator {
        &self.op
    }
}

impl From<Operator> for Hamiltonian {
    fn from(op: Operator) -> Self {
        Self::from_operator(op)
    }
}

// ---------------------------------------------------------------------------
// Pauli-sum construction
// ---------------------------------------------------------------------------

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The 2×2 matrix of this Pauli.
    pub fn matrix(self) -> Array2<Complex64> {
        match self {
            Self::I => linalg::identity(2),
            Self::X => ndarray::array![[ZERO, ONE], [ONE, ZERO]],
            Self::Y => ndarray::array![[ZERO, -I], [I, ZERO]],
            Self::Z => ndarray::array![[ONE, ZERO], [ZERO, -ONE]],
        }
    }

    /// Parse a single letter (`I`, `X`, `Y`, `Z`, case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with identity factors
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(usize, PauliOp)>,
}

impl PauliString {
    /// Construct from (qubit, op) pairs; identities are dropped and the
    /// remainder sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (usize, PauliOp)>) -> Self {
        let mut v: Vec<(usize, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Parse a dense label such as `"XIZ"`; character `k` acts on qubit `k`.
    pub fn from_label(label: &str) -> Option<Self> {
        let ops = label
            .chars()
            .enumerate()
            .map(|(q, c)| PauliOp::from_char(c).map(|op| (q, op)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::from_ops(ops))
    }

    /// Non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(usize, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity factors.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Highest qubit index referenced, or `None` for the identity string.
    pub fn max_qubit(&self) -> Option<usize> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Op acting on `qubit`.
    pub fn op_at(&self, qubit: usize) -> PauliOp {
        self.ops
            .iter()
            .find(|(q, _)| *q == qubit)
            .map_or(PauliOp::I, |(_, op)| *op)
    }

    /// Dense `2^n × 2^n` matrix, qubit 0 leftmost.
    pub fn to_matrix(&self, n_qubits: usize) -> Array2<Complex64> {
        (0..n_qubits).fold(linalg::identity(1), |acc, q| {
            linalg::kron(&acc, &self.op_at(q).matrix())
        })
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: usize, q1: usize, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }
}
