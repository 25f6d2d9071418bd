/// Depolarizing noise for state-vector simulation.
///
/// Noise is modeled using the quantum-trajectory (Monte Carlo wave-function)
/// method: at each noise application site a random number selects one of the
/// Pauli errors, which is then applied to the pure state. Pauli errors are
/// unitary, so no renormalization is needed.
///
/// The channel fires independently per affected qubit, immediately after an
/// eligible gate: with probability p a uniformly chosen Pauli (X, Y, or Z,
/// p/3 each) hits that qubit, otherwise nothing happens. When p = 0 or the
/// gate is not in the eligible set the channel is a bit-exact no-op and
/// consumes no random draws, so a zero-probability channel reproduces the
/// noiseless run exactly under the same seed.
use super::gates::{apply_single_qubit_gate, pauli_x, pauli_y, pauli_z, GateKind};
use super::state::StateVector;
use super::{Result, SimError};
use rand::Rng;
use std::collections::HashSet;

/// Single-qubit depolarizing error attached to a set of gate kinds.
#[derive(Debug, Clone)]
pub struct NoiseChannel {
    prob: f64,
    noisy_gates: HashSet<GateKind>,
}

impl NoiseChannel {
    /// Depolarizing channel with error probability `prob`, applied after
    /// every gate whose kind is in `gates`.
    ///
    /// Fails with `InvalidArgument` unless `prob` ∈ [0, 1].
    pub fn depolarizing(prob: f64, gates: impl IntoIterator<Item = GateKind>) -> Result<Self> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(SimError::InvalidArgument {
                msg: format!("noise probability {prob} outside [0, 1]"),
            });
        }
        Ok(Self {
            prob,
            noisy_gates: gates.into_iter().collect(),
        })
    }

    /// Same as [`NoiseChannel::depolarizing`] but with textual gate names
    /// (`"h"`, `"x"`, `"z"`, `"cx"`). Unknown names fail with
    /// `UnsupportedGate`.
    pub fn depolarizing_named(prob: f64, names: &[&str]) -> Result<Self> {
        let gates = names
            .iter()
            .map(|n| GateKind::from_name(n))
            .collect::<Result<Vec<_>>>()?;
        Self::depolarizing(prob, gates)
    }

    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// True when gates of `kind` are followed by a noise application.
    pub fn is_eligible(&self, kind: GateKind) -> bool {
        self.prob > 0.0 && self.noisy_gates.contains(&kind)
    }

    /// Apply the channel after a gate of `kind` acting on `targets`.
    ///
    /// Each target qubit draws independently from `rng`. Ineligible gates
    /// return without touching the RNG stream.
    pub fn apply_if_eligible<R: Rng>(
        &self,
        kind: GateKind,
        targets: &[usize],
        state: &mut StateVector,
        rng: &mut R,
    ) -> Result<()> {
        if !self.is_eligible(kind) {
            return Ok(());
        }

        let third = self.prob / 3.0;
        for &qubit in targets {
            let draw: f64 = rng.gen();
            if draw < third {
                apply_single_qubit_gate(state, &pauli_x(), qubit)?;
            } else if draw < 2.0 * third {
                apply_single_qubit_gate(state, &pauli_y(), qubit)?;
            } else if draw < self.prob {
                apply_single_qubit_gate(state, &pauli_z(), qubit)?;
            }
            // draw ≥ prob: no error on this qubit
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
