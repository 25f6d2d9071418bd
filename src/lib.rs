//! # qteleport
//!
//! Statevector simulation engine for the three-qubit quantum teleportation
//! protocol: multi-qubit state representation, unitary gate application,
//! probabilistic measurement with collapse, classically-conditioned gates,
//! a depolarizing noise channel, and repeated-trial ("shot") aggregation
//! into an outcome histogram.
//!
//! ## Quick Start
//!
//! ```rust
//! use num_complex::Complex64;
//! use qteleport::core::SimulationConfig;
//! use qteleport::protocol::{run_simulation, teleportation_circuit};
//!
//! // Teleport (|0⟩ + |1⟩)/√2 over 1024 noiseless shots
//! let psi = [
//!     Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0),
//!     Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0),
//! ];
//! let circuit = teleportation_circuit(psi).unwrap();
//! let config = SimulationConfig::new(1024).with_seed(7);
//! let (prepared, counts) = run_simulation(&circuit, &config).unwrap();
//!
//! println!("teleported state: {prepared:?}");
//! println!("measurement counts: {counts}");
//! assert_eq!(counts.total(), 1024);
//! ```

pub mod core;
pub mod protocol;
