//! Quantum systems owning a state vector.
//!
//! A [`System`] stores a normalised state and, optionally, the
//! Hamiltonian and [`Solver`] used to evolve it. Operators are applied
//! either to the whole state or to one qubit of a tensor-product
//! composite.
//!
//! # Tensor convention
//!
//! Qubit 0 is the leftmost Kronecker factor, i.e. the most significant bit
//! of a basis-state index. On two qubits, basis index 1 is `|01⟩` (qubit 1
//! set) and index 2 is `|10⟩` (qubit 0 set).

use ndarray::{Array1, ArrayD, Ix1};
use num_complex::Complex64;
use tracing::{debug, trace};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::linalg;
use crate::operator::Operator;
use crate::solver::Solver;

/// Operations shared by every system type.
pub trait QuantumSystem {
    /// The current state vector.
    fn state_vector(&self) -> &Array1<Complex64>;

    /// Replace the state with `op · state`.
    fn apply_global_op(&mut self, op: &Operator) -> SimResult<&Array1<Complex64>>;

    /// Apply a single-qubit `op` to qubit `target` of a
    /// `total_qubits`-qubit composite.
    fn apply_local_op(
        &mut self,
        op: &Operator,
        target: usize,
        total_qubits: usize,
    ) -> SimResult<&Array1<Complex64>>;

    /// Evolve for time `t` with the assigned Hamiltonian and solver.
    fn evolve(&mut self, t: f64) -> SimResult<&Array1<Complex64>>;
}

/// Embed a single-qubit operator into a `2^total_qubits` space.
///
/// Builds `I ⊗ … ⊗ op ⊗ … ⊗ I` with `op` in slot `target`, folding the
/// factors left to right.
pub fn embed_local_op(op: &Operator, target: usize, total_qubits: usize) -> SimResult<Operator> {
    if op.dim() != 2 {
        return Err(SimError::WrongDimension {
            expected: 2,
            got: op.dim(),
        });
    }
    if target >= total_qubits {
        return Err(SimError::QubitOutOfRange {
            target,
            total_qubits,
        });
    }
    linalg::qubit_dim(total_qubits)?;
    let identity = Operator::identity(2);
    let full = (0..total_qubits)
        .map(|q| if q == target { op } else { &identity })
        .fold(Operator::identity(1), |acc, factor| acc.tensor(factor));
    debug!(target, total_qubits, dim = full.dim(), "embedded local operator");
    Ok(full)
}

/// Validate and normalise an initial state.
pub(crate) fn normalized(state: Array1<Complex64>) -> SimResult<Array1<Complex64>> {
    if state.is_empty() {
        return Err(SimError::EmptyState);
    }
    if state.iter().any(|z| !z.is_finite()) {
        return Err(SimError::NonFiniteState);
    }
    let n = linalg::norm(&state);
    if n == 0.0 {
        return Err(SimError::ZeroNormState);
    }
    if !n.is_finite() {
        return Err(SimError::NonFiniteState);
    }
    if linalg::is_unit_norm(n) {
        Ok(state)
    } else {
        Ok(state / Complex64::new(n, 0.0))
    }
}

/// A generic composite quantum system.
#[derive(Debug)]
pub struct System {
    psi: Array1<Complex64>,
    hamiltonian: Option<Hamiltonian>,
    solver: Option<Box<dyn Solver>>,
}

impl System {
    /// Create a system from an initial state, normalising it if needed.
    pub fn new(state: Array1<Complex64>) -> SimResult<Self> {
        Ok(Self {
            psi: normalized(state)?,
            hamiltonian: None,
            solver: None,
        })
    }

    /// Wrap a state already known to be unit norm.
    pub(crate) fn from_normalized(psi: Array1<Complex64>) -> Self {
        Self {
            psi,
            hamiltonian: None,
            solver: None,
        }
    }

    /// Create a system from an array of any rank; only rank 1 is accepted.
    pub fn from_dyn(state: ArrayD<Complex64>) -> SimResult<Self> {
        let ndim = state.ndim();
        let flat = state
            .into_dimensionality::<Ix1>()
            .map_err(|_| SimError::NotOneDimensional { ndim })?;
        Self::new(flat)
    }

    /// Assign the generator used by [`QuantumSystem::evolve`].
    #[must_use]
    pub fn with_hamiltonian(mut self, hamiltonian: Hamiltonian) -> Self {
        self.hamiltonian = Some(hamiltonian);
        self
    }

    /// Assign the evolution strategy.
    #[must_use]
    pub fn with_solver(mut self, solver: impl Solver + 'static) -> Self {
        self.solver = Some(Box::new(solver));
        self
    }

    /// The assigned Hamiltonian, if any.
    pub fn hamiltonian(&self) -> Option<&Hamiltonian> {
        self.hamiltonian.as_ref()
    }

    /// The assigned solver, if any.
    pub fn solver(&self) -> Option<&dyn Solver> {
        self.solver.as_deref()
    }

    /// Dimension of the state space.
    pub fn dim(&self) -> usize {
        self.psi.len()
    }

    /// Number of qubits, if the dimension is a power of two.
    pub fn num_qubits(&self) -> Option<usize> {
        let dim = self.dim();
        dim.is_power_of_two().then(|| dim.trailing_zeros() as usize)
    }

    /// Euclidean norm of the current state.
    pub fn norm(&self) -> f64 {
        linalg::norm(&self.psi)
    }

    /// Born-rule probabilities `|ψ_i|²`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.psi.iter().map(Complex64::norm_sqr).collect()
    }

    /// Overwrite the state without normalisation.
    pub(crate) fn replace_state(&mut self, psi: Array1<Complex64>) {
        self.psi = psi;
    }
}

impl QuantumSystem for System {
    fn state_vector(&self) -> &Array1<Complex64> {
        &self.psi
    }

    fn apply_global_op(&mut self, op: &Operator) -> SimResult<&Array1<Complex64>> {
        trace!(dim = op.dim(), "applying global operator");
        self.psi = op.apply(&self.psi)?;
        Ok(&self.psi)
    }

    fn apply_local_op(
        &mut self,
        op: &Operator,
        target: usize,
        total_qubits: usize,
    ) -> SimResult<&Array1<Complex64>> {
        let full = embed_local_op(op, target, total_qubits)?;
        self.apply_global_op(&full)
    }

    fn evolve(&mut self, t: f64) -> SimResult<&Array1<Complex64>> {
        let solver = self.solver.as_deref().ok_or(SimError::MissingSolver)?;
        let hamiltonian = self
            .hamiltonian
            .as_ref()
            .ok_or(SimError::MissingHamiltonian)?;
        debug!(solver = solver.name(), t, "evolving system");
        self.psi = solver.evolve(&self.psi, hamiltonian, t)?;
        Ok(&self.psi)
    }
}
