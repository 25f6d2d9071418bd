/// Quantum gate definitions and application logic.
///
/// Single-qubit gates are 2×2 complex matrices. The full 2^N×2^N transform
/// is never materialized: application iterates over all 2^n basis states,
/// pairs up states that differ only in the target qubit, and applies the
/// 2×2 matrix to each pair — O(2^n) per gate. CNOT is a pure index swap.
///
/// The gate set is closed by construction: `Gate` enumerates exactly the
/// operations the teleportation protocol needs (plus Pauli-Y, reachable
/// only through the noise channel). Textual names only enter at the
/// noise-configuration boundary, via [`GateKind::from_name`].
use super::state::StateVector;
use super::{Result, SimError};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// A 2×2 complex unitary matrix representing a single-qubit gate.
/// Row-major: matrix[row][col]
pub type Matrix2x2 = [[Complex64; 2]; 2];

const C_ZERO: Complex64 = Complex64::new(0.0, 0.0);
const C_ONE: Complex64 = Complex64::new(1.0, 0.0);

// ── Standard Gate Matrices ─────────────────────────────────────────────────

/// Hadamard gate — creates superposition from a basis state.
/// H = (1/√2) * [[1, 1], [1, -1]]
pub fn hadamard() -> Matrix2x2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [
        [h, h],
        [h, -h],
    ]
}

/// Pauli-X gate — quantum NOT, flips |0⟩ ↔ |1⟩.
/// X = [[0, 1], [1, 0]]
pub fn pauli_x() -> Matrix2x2 {
    [
        [C_ZERO, C_ONE],
        [C_ONE, C_ZERO],
    ]
}

/// Pauli-Y gate — bit + phase flip. Only the noise channel issues this.
/// Y = [[0, -i], [i, 0]]
pub fn pauli_y() -> Matrix2x2 {
    let i = Complex64::new(0.0, 1.0);
    [
        [C_ZERO, -i],
        [i, C_ZERO],
    ]
}

/// Pauli-Z gate — phase flip, |1⟩ → -|1⟩.
/// Z = [[1, 0], [0, -1]]
pub fn pauli_z() -> Matrix2x2 {
    [
        [C_ONE, C_ZERO],
        [C_ZERO, Complex64::new(-1.0, 0.0)],
    ]
}

// ── Gate set ───────────────────────────────────────────────────────────────

/// Gate family, without target qubits. Used to match gates against the
/// noise channel's eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    H,
    X,
    Z,
    Cnot,
}

impl GateKind {
    /// Resolve a textual gate name. This is the one place where an unknown
    /// name can be requested, and it fails with `UnsupportedGate`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "z" => Ok(GateKind::Z),
            "cx" | "cnot" => Ok(GateKind::Cnot),
            other => Err(SimError::UnsupportedGate {
                name: other.to_owned(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Z => "z",
            GateKind::Cnot => "cx",
        }
    }
}

/// A gate instance bound to its target qubit(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    H { qubit: usize },
    X { qubit: usize },
    Z { qubit: usize },
    Cnot { control: usize, target: usize },
}

impl Gate {
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::H { .. } => GateKind::H,
            Gate::X { .. } => GateKind::X,
            Gate::Z { .. } => GateKind::Z,
            Gate::Cnot { .. } => GateKind::Cnot,
        }
    }

    /// Qubits this gate acts on, in (control, target) order for CNOT.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::H { qubit } | Gate::X { qubit } | Gate::Z { qubit } => vec![qubit],
            Gate::Cnot { control, target } => vec![control, target],
        }
    }

    /// Apply this gate to the state vector.
    pub fn apply(&self, state: &mut StateVector) -> Result<()> {
        match *self {
            Gate::H { qubit } => apply_single_qubit_gate(state, &hadamard(), qubit),
            Gate::X { qubit } => apply_single_qubit_gate(state, &pauli_x(), qubit),
            Gate::Z { qubit } => apply_single_qubit_gate(state, &pauli_z(), qubit),
            Gate::Cnot { control, target } => apply_cnot(state, control, target),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Gate::H { qubit } => write!(f, "h q{qubit}"),
            Gate::X { qubit } => write!(f, "x q{qubit}"),
            Gate::Z { qubit } => write!(f, "z q{qubit}"),
            Gate::Cnot { control, target } => write!(f, "cx q{control} q{target}"),
        }
    }
}

// ── Gate Application ───────────────────────────────────────────────────────

fn check_qubit(state: &StateVector, qubit: usize) -> Result<()> {
    if qubit >= state.num_qubits {
        return Err(SimError::IndexOutOfRange {
            register: "qubit",
            index: qubit,
            size: state.num_qubits,
        });
    }
    Ok(())
}

/// Apply a single-qubit gate to `target` qubit in the state vector.
///
/// Standard O(2ⁿ) pair-update loop: for each basis index with the target
/// bit clear, update the (bit=0, bit=1) amplitude pair through the matrix.
pub fn apply_single_qubit_gate(
    state: &mut StateVector,
    gate: &Matrix2x2,
    target: usize,
) -> Result<()> {
    check_qubit(state, target)?;

    let dim = state.dim();
    let target_mask = 1 << target;
    let mut i0 = 0;
    while i0 < dim {
        if i0 & target_mask != 0 {
            i0 += 1;
            continue;
        }
        let i1 = i0 | target_mask;
        let a0 = state.amplitudes[i0];
        let a1 = state.amplitudes[i1];
        state.amplitudes[i0] = gate[0][0] * a0 + gate[0][1] * a1;
        state.amplitudes[i1] = gate[1][0] * a0 + gate[1][1] * a1;
        i0 += 1;
    }
    Ok(())
}

/// Apply CNOT (Controlled-NOT) gate.
///
/// Flips `target` qubit when `control` qubit is |1⟩.
/// Implements quantum entanglement when combined with Hadamard.
pub fn apply_cnot(state: &mut StateVector, control: usize, target: usize) -> Result<()> {
    check_qubit(state, control)?;
    check_qubit(state, target)?;
    if control == target {
        return Err(SimError::InvalidArgument {
            msg: format!("cnot control and target must differ, both are {control}"),
        });
    }

    let dim = state.dim();
    let control_mask = 1 << control;
    let target_mask = 1 << target;

    for i in 0..dim {
        // Only act on basis states where control = 1 and target = 0
        if (i & control_mask != 0) && (i & target_mask == 0) {
            let j = i | target_mask; // flip the target bit
            state.amplitudes.swap(i, j);
        }
    }
    Ok(())
}
