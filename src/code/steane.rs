// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Steane [[7,1,3]] code circuits.
//!
//! The logical `|0>` is prepared by a Hadamard on qubit 0 followed by a fixed
//! CNOT network. The syndrome extractor replays the same network, read from
//! [`ENCODER_CNOTS`], and then measures every qubit.
//!
//! Reference: A. M. Steane, "Error Correcting Codes in Quantum Theory",
//!   Phys. Rev. Lett. 77, 793 (1996).

use tracing::debug;

use crate::circuit::{Circuit, Gate};
use crate::error::Result;
use crate::validation::validate_registers;

/// Physical qubits per logical qubit.
pub const STEANE_QUBITS: u32 = 7;

/// `(control, target)` pairs of the parity network, in application order.
pub const ENCODER_CNOTS: [(u32, u32); 10] = [
    (0, 3),
    (0, 5),
    (3, 1),
    (3, 4),
    (5, 2),
    (5, 6),
    (1, 2),
    (1, 4),
    (2, 6),
    (4, 6),
];

/// Build the encoding circuit for the Steane logical `|0>`.
///
/// Seven qubits, no classical bits, eleven gates: `H(0)` then
/// [`ENCODER_CNOTS`].
pub fn create_steane_code() -> Circuit {
    let mut qc = Circuit::new(STEANE_QUBITS);
    qc.push_unchecked(Gate::H { qubit: 0 });
    append_parity_network(&mut qc);
    qc
}

/// Append the syndrome-extraction sequence to `qc`.
///
/// The circuit must have exactly seven qubits and seven classical bits; on a
/// size mismatch nothing is appended.
pub fn measure_syndrome(qc: &mut Circuit) -> Result<()> {
    validate_registers(qc, STEANE_QUBITS, STEANE_QUBITS)?;

    append_parity_network(qc);
    for i in 0..STEANE_QUBITS {
        qc.push_unchecked(Gate::Measure { qubit: i, clbit: i });
    }
    debug!(gates = qc.len(), "Appended Steane syndrome extraction");
    Ok(())
}

/// Fresh 7-qubit, 7-bit circuit holding only the syndrome extraction.
pub fn syndrome_circuit() -> Result<Circuit> {
    let mut qc = Circuit::with_clbits(STEANE_QUBITS, STEANE_QUBITS);
    measure_syndrome(&mut qc)?;
    Ok(qc)
}

fn append_parity_network(qc: &mut Circuit) {
    for &(control, target) in &ENCODER_CNOTS {
        qc.push_unchecked(Gate::Cx { control, target });
    }
}
