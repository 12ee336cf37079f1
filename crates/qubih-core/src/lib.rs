//! `qubih-core`: state-vector and operator algebra with exact time
//! evolution.
//!
//! Quantum states are complex vectors; gates and Hamiltonians are complex
//! square matrices acting on them. Evolution under a time-independent
//! Hamiltonian uses the matrix exponential
//!
//!   |ψ(t)⟩ = exp(-i H t / ħ) |ψ(0)⟩
//!
//! so the result is exact up to floating-point error.
//!
//! - [`Operator`]: composition, scaling, sums, adjoint, Hermitian/unitary checks
//! - [`Hamiltonian`]: generator with `evolve` / `propagator`
//! - [`Solver`] / [`ExpmSolver`]: pluggable evolution strategy
//! - [`System`]: owns a state; global and single-qubit (tensor-embedded) operators
//! - [`Qubit`]: two-level system with projective measurement
//!
//! # Quick start
//!
//! ```rust
//! use std::f64::consts::FRAC_PI_2;
//!
//! use ndarray::array;
//! use num_complex::Complex64;
//! use qubih_core::{ExpmSolver, Hamiltonian, QuantumSystem, System, gates};
//!
//! let one = Complex64::new(1.0, 0.0);
//! let zero = Complex64::new(0.0, 0.0);
//!
//! // H = X, evolve |0⟩ for t = π/2  →  -i|1⟩
//! let h = Hamiltonian::from_operator(gates::x());
//! let mut system = System::new(array![one, zero])
//!     .unwrap()
//!     .with_hamiltonian(h)
//!     .with_solver(ExpmSolver::new());
//!
//! let psi = system.evolve(FRAC_PI_2).unwrap();
//! assert!((psi[1] - Complex64::new(0.0, -1.0)).norm() < 1e-9);
//! ```

pub mod error;
pub mod gates;
pub mod hamiltonian;
pub mod linalg;
pub mod operator;
pub mod qubit;
pub mod solver;
pub mod system;

pub use error::{ErrorKind, SimError, SimResult};
pub use gates::GateKind;
pub use hamiltonian::{Hamiltonian, PauliOp, PauliString, PauliTerm};
pub use operator::{Operand, Operator, Product};
pub use qubit::Qubit;
pub use solver::{ExpmSolver, Solver};
pub use system::{QuantumSystem, System, embed_local_op};
