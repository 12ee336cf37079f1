//! Error types for the core crate.

use thiserror::Error;

/// Broad classification of a [`SimError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input shape or out-of-range value.
    Value,
    /// Operand type does not support the requested combination.
    Type,
    /// Shape-incompatible matrix/vector operation.
    Dimension,
    /// Evolution requested on a system that lacks a Hamiltonian or solver.
    Configuration,
    /// Measurement weights could not be sampled.
    Sampling,
}

/// Errors produced by state and operator algebra.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A state vector must be a flat sequence of amplitudes.
    #[error("State vector must be one-dimensional, got {ndim} dimensions")]
    NotOneDimensional {
        /// Number of axes of the rejected array.
        ndim: usize,
    },

    /// Operator matrices must be square.
    #[error("Operator matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// A state vector needs at least one amplitude.
    #[error("State vector is empty")]
    EmptyState,

    /// The zero vector cannot be normalized.
    #[error("State vector has zero norm and cannot be normalized")]
    ZeroNormState,

    /// Amplitudes must be finite numbers.
    #[error("State vector contains NaN or infinite amplitudes")]
    NonFiniteState,

    /// `2^n_qubits` does not fit in the address space.
    #[error("Cannot represent {n_qubits} qubits: state dimension 2^{n_qubits} overflows")]
    TooManyQubits {
        /// Requested qubit count.
        n_qubits: usize,
    },

    /// A fixed-size system received a state of the wrong length.
    #[error("Expected a state of dimension {expected}, got {got}")]
    WrongDimension {
        /// Required dimension.
        expected: usize,
        /// Supplied dimension.
        got: usize,
    },

    /// ħ must be finite and strictly positive.
    #[error("Reduced Planck constant must be finite and positive, got {0}")]
    InvalidPlanckConstant(f64),

    /// A local operator targets a qubit outside the composite system.
    #[error("Target qubit {target} out of range for a {total_qubits}-qubit system")]
    QubitOutOfRange {
        /// The offending qubit index.
        target: usize,
        /// Number of qubits in the composite system.
        total_qubits: usize,
    },

    /// A Pauli-sum Hamiltonian needs at least one term.
    #[error("Hamiltonian has no terms to sum")]
    EmptyHamiltonian,

    /// Gate name not recognised by [`crate::gates::GateKind::from_name`].
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// The operand cannot take part in the requested algebraic operation.
    #[error("Unsupported operand for {operation}: 'Operator' and '{operand}'")]
    UnsupportedOperand {
        /// Operation symbol, e.g. `+`.
        operation: &'static str,
        /// Name of the rejected operand kind.
        operand: &'static str,
    },

    /// Shapes do not line up for a matrix or vector operation.
    #[error("Dimension mismatch in {operation}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        /// Operation being performed.
        operation: &'static str,
        /// Shape of the left operand.
        lhs: Vec<usize>,
        /// Shape of the right operand.
        rhs: Vec<usize>,
    },

    /// `evolve` called without an assigned Hamiltonian.
    #[error("System has no Hamiltonian assigned; cannot evolve")]
    MissingHamiltonian,

    /// `evolve` called without an assigned solver.
    #[error("System has no solver assigned; cannot evolve")]
    MissingSolver,

    /// Measurement probabilities were not a valid distribution.
    #[error("Cannot sample measurement outcome: {0}")]
    Sampling(String),
}

impl SimError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOneDimensional { .. }
            | Self::NotSquare { .. }
            | Self::EmptyState
            | Self::ZeroNormState
            | Self::NonFiniteState
            | Self::TooManyQubits { .. }
            | Self::WrongDimension { .. }
            | Self::InvalidPlanckConstant(_)
            | Self::QubitOutOfRange { .. }
            | Self::EmptyHamiltonian
            | Self::UnknownGate(_) => ErrorKind::Value,
            Self::UnsupportedOperand { .. } => ErrorKind::Type,
            Self::DimensionMismatch { .. } => ErrorKind::Dimension,
            Self::MissingHamiltonian | Self::MissingSolver => ErrorKind::Configuration,
            Self::Sampling(_) => ErrorKind::Sampling,
        }
    }
}

/// Result type for core operations.
pub type SimResult<T> = Result<T, SimError>;
