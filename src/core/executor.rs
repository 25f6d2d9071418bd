/// Shot execution and statistical aggregation.
///
/// A "shot" is one independent trial of a circuit: a fresh state vector and
/// classical register, every operation executed strictly in order, gates
/// routed through the noise channel, and the final classical register folded
/// into a counts table keyed by bit-string.
///
/// Shots are mutually independent and run in parallel: each owns its own
/// state, register, and a private ChaCha stream derived from the base seed
/// and the shot index. Partial tallies merge by per-key addition, which is
/// associative and commutative, so the parallel reduction is order-free.
///
/// Classical register file:
///   One slot per declared classical bit, zero-initialized each shot.
///   Written by Measure. Read by Conditional.
use super::circuit::{Circuit, Operation};
use super::noise::NoiseChannel;
use super::state::StateVector;
use super::{Result, SimError};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;

// ── Configuration ──────────────────────────────────────────────────────────

/// Run parameters, passed by value into [`run`]. There is no process-wide
/// simulator instance; two runs only share state through their arguments.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of independent trials. Must be ≥ 1.
    pub shots: usize,
    /// Optional noise channel; `None` means ideal simulation.
    pub noise: Option<NoiseChannel>,
    /// Base seed for the per-shot RNG streams. `None` draws a fresh seed,
    /// making the run non-reproducible but still internally consistent.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(shots: usize) -> Self {
        Self {
            shots,
            noise: None,
            seed: None,
        }
    }

    pub fn with_noise(mut self, noise: NoiseChannel) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ── Counts table ───────────────────────────────────────────────────────────

/// Frequency table of classical-register outcomes across shots.
///
/// Keys are bit-strings with the highest classical bit first (register
/// declaration order, matching the MSB-first basis labels).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counts {
    table: HashMap<String, u64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the tally for `key` by one.
    pub fn record(&mut self, key: &str) {
        *self.table.entry(key.to_owned()).or_insert(0) += 1;
    }

    /// Combine two partial tallies by per-key addition.
    pub fn merge(mut self, other: Counts) -> Counts {
        for (key, n) in other.table {
            *self.table.entry(key).or_insert(0) += n;
        }
        self
    }

    /// Count for `key`, zero if the outcome never occurred.
    pub fn get(&self, key: &str) -> u64 {
        self.table.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts. Equals the shot count after a successful run.
    pub fn total(&self) -> u64 {
        self.table.values().sum()
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.table.iter().map(|(k, &n)| (k.as_str(), n))
    }

    /// Outcomes sorted by bit-string key, for stable display.
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self
            .table
            .iter()
            .map(|(k, &n)| (k.clone(), n))
            .collect();
        entries.sort();
        entries
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, n)) in self.sorted().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{key}\": {n}")?;
        }
        write!(f, "}}")
    }
}

// ── Single-shot execution ──────────────────────────────────────────────────

/// Execute one trial of `circuit` on a fresh state vector.
///
/// Returns the final classical register (indexed by clbit) and the
/// post-execution state vector. Surfaced for diagnostics and tests; [`run`]
/// is the aggregating entry point.
pub fn execute_shot<R: Rng>(
    circuit: &Circuit,
    noise: Option<&NoiseChannel>,
    rng: &mut R,
) -> Result<(Vec<bool>, StateVector)> {
    let mut state = StateVector::new(circuit.num_qubits());
    if let Some((qubit, amps)) = circuit.input_state() {
        state.initialize(qubit, amps)?;
    }
    let mut classical = vec![false; circuit.num_clbits()];

    for op in circuit.operations() {
        match *op {
            Operation::Gate(gate) => {
                gate.apply(&mut state)?;
                if let Some(channel) = noise {
                    channel.apply_if_eligible(gate.kind(), &gate.qubits(), &mut state, rng)?;
                }
            }
            Operation::Measure { qubit, clbit } => {
                let draw: f64 = rng.gen();
                classical[clbit] = state.collapse(qubit, draw);
            }
            Operation::Conditional { gate, clbit, value } => {
                // No-op unless the classical bit matches; otherwise behaves
                // exactly as the unconditional gate, noise included.
                if classical[clbit] == value {
                    gate.apply(&mut state)?;
                    if let Some(channel) = noise {
                        channel.apply_if_eligible(
                            gate.kind(),
                            &gate.qubits(),
                            &mut state,
                            rng,
                        )?;
                    }
                }
            }
        }
    }

    Ok((classical, state))
}

/// Format a classical register as an outcome key, highest clbit first.
pub fn outcome_key(bits: &[bool]) -> String {
    bits.iter()
        .rev()
        .map(|&b| if b { '1' } else { '0' })
        .collect()
}

// ── Multi-shot sampling ────────────────────────────────────────────────────

/// Derive the private stream seed for one shot (splitmix-style stride keeps
/// neighboring shot seeds decorrelated).
fn shot_seed(base: u64, shot: u64) -> u64 {
    base.wrapping_add(shot.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run `circuit` for `config.shots` independent trials and aggregate the
/// classical outcomes into a [`Counts`] table.
///
/// Fails with `InvalidArgument` when `shots` is zero; any per-shot failure
/// aborts the whole run with no partial counts (a malformed circuit
/// invalidates all shots uniformly). On success the counts total equals
/// `shots` exactly.
pub fn run(circuit: &Circuit, config: &SimulationConfig) -> Result<Counts> {
    if config.shots == 0 {
        return Err(SimError::InvalidArgument {
            msg: "shots must be a positive integer".to_owned(),
        });
    }

    let base_seed = config.seed.unwrap_or_else(rand::random);
    debug!(
        "running {} shot(s) over {} qubit(s) / {} clbit(s), base seed {:#018x}, noise p = {}",
        config.shots,
        circuit.num_qubits(),
        circuit.num_clbits(),
        base_seed,
        config.noise.as_ref().map_or(0.0, NoiseChannel::prob),
    );

    let noise = config.noise.as_ref();
    let counts = (0..config.shots)
        .into_par_iter()
        .map(|shot| -> Result<String> {
            let mut rng = ChaCha8Rng::seed_from_u64(shot_seed(base_seed, shot as u64));
            let (classical, _) = execute_shot(circuit, noise, &mut rng)?;
            Ok(outcome_key(&classical))
        })
        .try_fold(Counts::new, |mut acc, key: Result<String>| -> Result<Counts> {
            acc.record(&key?);
            Ok(acc)
        })
        .try_reduce(Counts::new, |a, b| Ok(a.merge(b)))?;

    debug!("aggregated {} distinct outcome(s)", counts.len());
    Ok(counts)
}

// ── Tests ─────────────────────────────────────────────────────────────────
