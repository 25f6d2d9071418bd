/// Statevector simulation core.
///
/// Pipeline: Circuit description → per-shot execution → Counts aggregation
///
/// Each concern is a separate module with a clean boundary:
///   - `state`    — complex amplitude vector, collapse, initialization
///   - `gates`    — gate matrices and O(2ⁿ) application kernels
///   - `noise`    — single-qubit depolarizing channel
///   - `circuit`  — ordered operation list over fixed registers
///   - `executor` — shot sampling, classical registers, counts
pub mod circuit;
pub mod executor;
pub mod gates;
pub mod noise;
pub mod state;

pub use circuit::{Circuit, Operation};
pub use executor::{execute_shot, run, Counts, SimulationConfig};
pub use gates::{Gate, GateKind};
pub use noise::NoiseChannel;
pub use state::StateVector;

use thiserror::Error;

/// Result alias shared across the simulation core.
pub type Result<T> = std::result::Result<T, SimError>;

/// Error type shared across all simulation stages.
///
/// Every variant is a local validation failure detected before or at the
/// offending operation. A failed run produces no partial counts — a
/// malformed circuit invalidates all shots uniformly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Injected amplitude pair is not unit-norm.
    #[error("invalid state: |α|² + |β|² = {norm_sq:.9}, expected 1 within {tolerance:e}")]
    InvalidState { norm_sq: f64, tolerance: f64 },

    /// Unknown gate name requested.
    #[error("unsupported gate '{name}' (supported: h, x, z, cx)")]
    UnsupportedGate { name: String },

    /// Qubit or classical-bit index outside the declared register.
    #[error("{register} index {index} out of range for register of size {size}")]
    IndexOutOfRange {
        register: &'static str,
        index: usize,
        size: usize,
    },

    /// Malformed run parameter (zero shots, probability outside [0, 1], …).
    #[error("invalid argument: {msg}")]
    InvalidArgument { msg: String },
}
