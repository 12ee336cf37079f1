//! Time-evolution strategies.

use std::fmt;

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::SimResult;
use crate::hamiltonian::Hamiltonian;

/// Maps `(state, hamiltonian, t)` to the evolved state.
///
/// Implementations hold no mutable state, so one solver can be shared by
/// many systems.
pub trait Solver: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Evolve `state` under `hamiltonian` for time `t`.
    fn evolve(
        &self,
        state: &Array1<Complex64>,
        hamiltonian: &Hamiltonian,
        t: f64,
    ) -> SimResult<Array1<Complex64>>;
}

/// Exact propagation through the matrix exponential.
///
/// Delegates to [`Hamiltonian::evolve`], so both paths agree bit for bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpmSolver {
    reduced_planck_constant: f64,
}

impl ExpmSolver {
    /// Solver in natural units (ħ = 1).
    pub fn new() -> Self {
        Self {
            reduced_planck_constant: 1.0,
        }
    }

    /// Override ħ.
    #[must_use]
    pub fn with_reduced_planck_constant(mut self, hbar: f64) -> Self {
        self.reduced_planck_constant = hbar;
        self
    }

    /// The ħ this solver divides by.
    pub fn reduced_planck_constant(&self) -> f64 {
        self.reduced_planck_constant
    }
}

impl Default for ExpmSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for ExpmSolver {
    fn name(&self) -> &str {
        "expm"
    }

    fn evolve(
        &self,
        state: &Array1<Complex64>,
        hamiltonian: &Hamiltonian,
        t: f64,
    ) -> SimResult<Array1<Complex64>> {
        hamiltonian.evolve(state, t, self.reduced_planck_constant)
    }
}
