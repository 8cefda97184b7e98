// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Gate-level circuit builder.
//!
//! A [`Circuit`] owns a fixed-width quantum register, an optional classical
//! register and an ordered list of [`Gate`]s. Gates are only ever appended;
//! order is significant and never rewritten.
//!
//! ```
//! use steane_qec::circuit::{Circuit, Gate};
//!
//! let mut qc = Circuit::with_clbits(2, 2);
//! qc.h(0).unwrap();
//! qc.cx(0, 1).unwrap();
//! qc.measure(0, 0).unwrap();
//!
//! assert_eq!(qc.len(), 3);
//! assert_eq!(qc.gates()[1], Gate::Cx { control: 0, target: 1 });
//! ```

mod draw;
mod qasm;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// A single circuit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Gate {
    /// Hadamard
    H { qubit: u32 },
    /// Controlled-NOT
    Cx { control: u32, target: u32 },
    /// Pauli X (bit flip)
    X { qubit: u32 },
    /// Z-basis measurement of `qubit` into classical bit `clbit`
    Measure { qubit: u32, clbit: u32 },
}

impl Gate {
    /// Lower-case gate mnemonic, as used in OpenQASM.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H { .. } => "h",
            Gate::Cx { .. } => "cx",
            Gate::X { .. } => "x",
            Gate::Measure { .. } => "measure",
        }
    }

    /// Qubits the gate acts on, control first.
    pub fn qubits(&self) -> Vec<u32> {
        match *self {
            Gate::H { qubit } | Gate::X { qubit } | Gate::Measure { qubit, .. } => vec![qubit],
            Gate::Cx { control, target } => vec![control, target],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H { qubit } => write!(f, "h q[{}]", qubit),
            Gate::Cx { control, target } => write!(f, "cx q[{}], q[{}]", control, target),
            Gate::X { qubit } => write!(f, "x q[{}]", qubit),
            Gate::Measure { qubit, clbit } => write!(f, "c[{}] = measure q[{}]", clbit, qubit),
        }
    }
}

/// Ordered gate list over fixed quantum and classical registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: u32,
    num_clbits: u32,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit with no classical register.
    pub fn new(num_qubits: u32) -> Self {
        Self::with_clbits(num_qubits, 0)
    }

    /// Create an empty circuit with a classical register.
    pub fn with_clbits(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            num_qubits,
            num_clbits,
            gates: Vec::new(),
        }
    }

    /// Width of the quantum register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Width of the classical register.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True if no gate has been appended.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Last appended gate.
    pub fn last(&self) -> Option<&Gate> {
        self.gates.last()
    }

    /// Append a gate after checking it against the registers.
    pub fn append(&mut self, gate: Gate) -> Result<()> {
        self.check(&gate)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Append a Hadamard.
    pub fn h(&mut self, qubit: u32) -> Result<()> {
        self.append(Gate::H { qubit })
    }

    /// Append a CNOT.
    pub fn cx(&mut self, control: u32, target: u32) -> Result<()> {
        self.append(Gate::Cx { control, target })
    }

    /// Append a Pauli X.
    pub fn x(&mut self, qubit: u32) -> Result<()> {
        self.append(Gate::X { qubit })
    }

    /// Append a measurement of `qubit` into `clbit`.
    pub fn measure(&mut self, qubit: u32, clbit: u32) -> Result<()> {
        self.append(Gate::Measure { qubit, clbit })
    }

    /// Per-gate-name counts.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for gate in &self.gates {
            *counts.entry(gate.name()).or_insert(0) += 1;
        }
        counts
    }

    /// `(control, target)` of every CNOT, in order.
    pub fn cx_pairs(&self) -> Vec<(u32, u32)> {
        self.gates
            .iter()
            .filter_map(|g| match *g {
                Gate::Cx { control, target } => Some((control, target)),
                _ => None,
            })
            .collect()
    }

    /// Push a gate whose indices are known to be in range.
    pub(crate) fn push_unchecked(&mut self, gate: Gate) {
        debug_assert!(self.check(&gate).is_ok(), "invalid gate {:?}", gate);
        self.gates.push(gate);
    }

    fn check(&self, gate: &Gate) -> std::result::Result<(), ValidationError> {
        for qubit in gate.qubits() {
            if qubit >= self.num_qubits {
                return Err(ValidationError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        match *gate {
            Gate::Cx { control, target } if control == target => Err(ValidationError::Field {
                field: "cx".into(),
                message: format!("control and target are both qubit {}", control),
            }),
            Gate::Measure { clbit, .. } if clbit >= self.num_clbits => {
                Err(ValidationError::ClbitOutOfRange {
                    clbit,
                    num_clbits: self.num_clbits,
                })
            }
            _ => Ok(()),
        }
    }
}
