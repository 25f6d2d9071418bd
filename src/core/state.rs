/// Quantum state vector representation.
///
/// An n-qubit system has 2^n basis states.
/// The state vector holds one complex amplitude per basis state.
/// The vector must satisfy the normalization constraint: Σ|αᵢ|² = 1
use super::{Result, SimError};
use num_complex::Complex64;
use std::fmt;

/// Tolerance for validating an injected amplitude pair against unit norm.
pub const NORM_TOLERANCE: f64 = 1e-6;

pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩.
    /// All amplitude is concentrated in the all-zeros basis state.
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits >= 1, "at least one qubit required");
        assert!(num_qubits <= 30, "num_qubits > 30 would require >8 GB RAM");

        let dim = 1 << num_qubits; // 2^n
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[0] = Complex64::new(1.0, 0.0); // |0...0⟩ state

        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Dimension of the state space: 2^n
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Probability of measuring basis state at index `i`: |αᵢ|²
    #[inline(always)]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    /// Total probability (should be ≈ 1.0 after normalization)
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Re-normalize the state vector to unit length.
    /// Used after numerical drift in long simulation chains.
    pub fn normalize(&mut self) {
        let total = self.total_probability();
        if total < 1e-12 {
            panic!("State vector collapsed to zero — unphysical state");
        }
        let inv_norm = 1.0 / total.sqrt();
        for amp in self.amplitudes.iter_mut() {
            *amp *= inv_norm;
        }
    }

    /// Embed a normalized single-qubit state (α|0⟩ + β|1⟩) into `qubit` via
    /// tensor product with the rest of the register.
    ///
    /// The target qubit must currently hold |0⟩ (true for a freshly created
    /// vector). Fails with `InvalidState` when |α|² + |β|² deviates from 1
    /// by more than [`NORM_TOLERANCE`].
    pub fn initialize(&mut self, qubit: usize, amps: [Complex64; 2]) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(SimError::IndexOutOfRange {
                register: "qubit",
                index: qubit,
                size: self.num_qubits,
            });
        }
        let norm_sq = amps[0].norm_sqr() + amps[1].norm_sqr();
        if (norm_sq - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::InvalidState {
                norm_sq,
                tolerance: NORM_TOLERANCE,
            });
        }

        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                let base = self.amplitudes[i];
                self.amplitudes[i] = base * amps[0];
                self.amplitudes[i | mask] = base * amps[1];
            }
        }
        Ok(())
    }

    /// Check if this qubit's bit is set in basis state index `basis_idx`.
    /// Qubit 0 is the least-significant bit.
    #[inline(always)]
    pub fn qubit_bit(basis_idx: usize, qubit: usize) -> bool {
        (basis_idx >> qubit) & 1 == 1
    }

    /// Return a string representation of basis state `index` as a ket |010...⟩.
    /// Qubit 0 is rightmost (LSB convention).
    pub fn basis_label(&self, index: usize) -> String {
        let mut s = String::with_capacity(self.num_qubits);
        for q in (0..self.num_qubits).rev() {
            s.push(if Self::qubit_bit(index, q) { '1' } else { '0' });
        }
        s
    }

    /// Return the probability of measuring qubit `q` in state |1⟩,
    /// marginalized over all other qubits.
    pub fn marginal_probability_one(&self, qubit: usize) -> f64 {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| Self::qubit_bit(*i, qubit))
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Perform projective measurement collapse on qubit `q`.
    ///
    /// `draw` must be a uniform random value in [0, 1) — this is the sole
    /// point where the simulation is genuinely probabilistic.
    /// Returns `true` if the qubit measured as |1⟩, `false` for |0⟩.
    /// The state vector is collapsed and re-normalized in-place.
    pub fn collapse(&mut self, qubit: usize, draw: f64) -> bool {
        let prob_one = self.marginal_probability_one(qubit);
        let outcome = draw < prob_one;

        // Zero out amplitudes inconsistent with measurement outcome
        for i in 0..self.dim() {
            if Self::qubit_bit(i, qubit) != outcome {
                self.amplitudes[i] = Complex64::new(0.0, 0.0);
            }
        }

        self.normalize();
        outcome
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StateVector ({} qubits, dim={}):", self.num_qubits, self.dim())?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > 1e-12 {
                writeln!(
                    f,
                    "  |{}⟩  amplitude: {:.4}{:+.4}i  probability: {:.4}",
                    self.basis_label(i),
                    amp.re,
                    amp.im,
                    prob
                )?;
            }
        }
        Ok(())
    }
}
