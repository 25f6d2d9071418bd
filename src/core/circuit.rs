/// Circuit description: an ordered operation list over fixed registers.
///
/// A circuit declares its qubit and classical-bit register sizes up front;
/// every pushed operation is validated against them, so execution never has
/// to range-check. Insertion order is execution order — quantum operations
/// do not commute in general and the executor never reorders.
///
/// Classical control is a tagged variant (`Operation::Conditional`), not
/// jump-based control flow: the protocol needs exactly "apply this gate if
/// classical bit b equals v" and nothing more.
use super::gates::Gate;
use super::state::NORM_TOLERANCE;
use super::{Result, SimError};
use num_complex::Complex64;
use std::fmt;

/// One step of a circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Unconditional unitary gate.
    Gate(Gate),
    /// Projective measurement of `qubit`, outcome written to `clbit`.
    Measure { qubit: usize, clbit: usize },
    /// `gate` applied only when `clbit` currently equals `value`.
    Conditional { gate: Gate, clbit: usize, value: bool },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(g) => write!(f, "{g}"),
            Operation::Measure { qubit, clbit } => write!(f, "measure q{qubit} -> c{clbit}"),
            Operation::Conditional { gate, clbit, value } => {
                write!(f, "{gate} if c{clbit} == {}", *value as u8)
            }
        }
    }
}

#[derive(Debug)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    /// Injected initial single-qubit state, embedded into a fresh |0…0⟩
    /// vector at the start of every shot.
    input_state: Option<(usize, [Complex64; 2])>,
    ops: Vec<Operation>,
}

impl Circuit {
    /// Empty circuit over `num_qubits` qubits and `num_clbits` classical bits.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        assert!(num_qubits >= 1, "at least one qubit required");
        Self {
            num_qubits,
            num_clbits,
            input_state: None,
            ops: Vec::new(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn input_state(&self) -> Option<(usize, [Complex64; 2])> {
        self.input_state
    }

    /// Declare the arbitrary single-qubit state to load into `qubit` before
    /// each shot. The pair must be unit-norm within [`NORM_TOLERANCE`].
    pub fn set_input_state(&mut self, qubit: usize, amps: [Complex64; 2]) -> Result<&mut Self> {
        self.check_qubit(qubit)?;
        let norm_sq = amps[0].norm_sqr() + amps[1].norm_sqr();
        if (norm_sq - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::InvalidState {
                norm_sq,
                tolerance: NORM_TOLERANCE,
            });
        }
        self.input_state = Some((qubit, amps));
        Ok(self)
    }

    /// Append an operation. Fails with `IndexOutOfRange` when any referenced
    /// qubit or classical bit lies outside the declared registers.
    pub fn push(&mut self, op: Operation) -> Result<&mut Self> {
        match op {
            Operation::Gate(gate) => self.check_gate(gate)?,
            Operation::Measure { qubit, clbit } => {
                self.check_qubit(qubit)?;
                self.check_clbit(clbit)?;
            }
            Operation::Conditional { gate, clbit, .. } => {
                self.check_gate(gate)?;
                self.check_clbit(clbit)?;
            }
        }
        self.ops.push(op);
        Ok(self)
    }

    // ── Builder conveniences ──────────────────────────────────────────────

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(Operation::Gate(Gate::H { qubit }))
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(Operation::Gate(Gate::X { qubit }))
    }

    pub fn z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(Operation::Gate(Gate::Z { qubit }))
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.push(Operation::Gate(Gate::Cnot { control, target }))
    }

    pub fn measure(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self> {
        self.push(Operation::Measure { qubit, clbit })
    }

    /// X on `qubit` when `clbit` reads 1.
    pub fn x_if(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self> {
        self.push(Operation::Conditional {
            gate: Gate::X { qubit },
            clbit,
            value: true,
        })
    }

    /// Z on `qubit` when `clbit` reads 1.
    pub fn z_if(&mut self, qubit: usize, clbit: usize) -> Result<&mut Self> {
        self.push(Operation::Conditional {
            gate: Gate::Z { qubit },
            clbit,
            value: true,
        })
    }

    // ── Validation ────────────────────────────────────────────────────────

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(SimError::IndexOutOfRange {
                register: "qubit",
                index: qubit,
                size: self.num_qubits,
            });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: usize) -> Result<()> {
        if clbit >= self.num_clbits {
            return Err(SimError::IndexOutOfRange {
                register: "clbit",
                index: clbit,
                size: self.num_clbits,
            });
        }
        Ok(())
    }

    fn check_gate(&self, gate: Gate) -> Result<()> {
        for q in gate.qubits() {
            self.check_qubit(q)?;
        }
        if let Gate::Cnot { control, target } = gate {
            if control == target {
                return Err(SimError::InvalidArgument {
                    msg: format!("cnot control and target must differ, both are {control}"),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit ({} qubits, {} clbits, {} ops):",
            self.num_qubits,
            self.num_clbits,
            self.ops.len()
        )?;
        if let Some((q, amps)) = self.input_state {
            writeln!(
                f,
                "  init q{q} <- [{:.4}{:+.4}i, {:.4}{:+.4}i]",
                amps[0].re, amps[0].im, amps[1].re, amps[1].im
            )?;
        }
        for op in &self.ops {
            writeln!(f, "  {op}")?;
        }
        Ok(())
    }
}
