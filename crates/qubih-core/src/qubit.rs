//! Single-qubit systems with projective measurement.

use ndarray::{Array1, array};
use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::linalg::{ONE, ZERO};
use crate::operator::Operator;
use crate::solver::Solver;
use crate::system::{QuantumSystem, System};

/// A two-level system.
///
/// Wraps a [`System`] whose state dimension is fixed at 2 and adds
/// measurement in the computational basis.
#[derive(Debug)]
pub struct Qubit {
    system: System,
}

impl Qubit {
    /// A qubit in `|0⟩`.
    pub fn new() -> Self {
        Self {
            system: System::from_normalized(array![ONE, ZERO]),
        }
    }

    /// A qubit in the given state, normalised if needed.
    pub fn from_state(state: Array1<Complex64>) -> SimResult<Self> {
        if state.len() != 2 {
            return Err(SimError::WrongDimension {
                expected: 2,
                got: state.len(),
            });
        }
        Ok(Self {
            system: System::new(state)?,
        })
    }

    /// Assign the generator used by [`QuantumSystem::evolve`].
    #[must_use]
    pub fn with_hamiltonian(mut self, hamiltonian: Hamiltonian) -> Self {
        self.system = self.system.with_hamiltonian(hamiltonian);
        self
    }

    /// Assign the evolution strategy.
    #[must_use]
    pub fn with_solver(mut self, solver: impl Solver + 'static) -> Self {
        self.system = self.system.with_solver(solver);
        self
    }

    /// Apply a gate to the qubit and return the new state.
    pub fn apply_gate(&mut self, gate: &Operator) -> SimResult<&Array1<Complex64>> {
        self.system.apply_global_op(gate)
    }

    /// `[|α|², |β|²]`.
    pub fn probabilities(&self) -> [f64; 2] {
        let psi = self.system.state_vector();
        [psi[0].norm_sqr(), psi[1].norm_sqr()]
    }

    /// Measure in the computational basis.
    ///
    /// Draws outcome `o ∈ {0, 1}` with probability `|ψ_o|²`, collapses the
    /// state to `|o⟩` and returns `o`. Phase information is discarded.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<usize> {
        let weights = self.probabilities();
        let dist = WeightedIndex::new(weights).map_err(|e| SimError::Sampling(e.to_string()))?;
        let outcome = dist.sample(rng);

        let mut collapsed = Array1::from_elem(2, ZERO);
        collapsed[outcome] = ONE;
        self.system.replace_state(collapsed);

        debug!(outcome, p0 = weights[0], p1 = weights[1], "measured qubit");
        Ok(outcome)
    }

    /// The underlying generic system.
    pub fn as_system(&self) -> &System {
        &self.system
    }
}

impl Default for Qubit {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumSystem for Qubit {
    fn state_vector(&self) -> &Array1<Complex64> {
        self.system.state_vector()
    }

    fn apply_global_op(&mut self, op: &Operator) -> SimResult<&Array1<Complex64>> {
        self.system.apply_global_op(op)
    }

    fn apply_local_op(
        &mut self,
        op: &Operator,
        target: usize,
        total_qubits: usize,
    ) -> SimResult<&Array1<Complex64>> {
        self.system.apply_local_op(op, target, total_qubits)
    }

    fn evolve(&mut self, t: f64) -> SimResult<&Array1<Complex64>> {
        self.system.evolve(t)
    }
}
