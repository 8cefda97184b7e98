// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! OpenQASM 3.0 rendering.
//!
//! Remote backends accept circuits as OpenQASM source. Only the standard
//! gate library (`stdgates.inc`) is referenced.
//!
//! Reference: Cross et al., "OpenQASM 3: A broader and deeper quantum
//!   assembly language", ACM Transactions on Quantum Computing (2022).

use std::fmt::Write as _;

use super::Circuit;

impl Circuit {
    /// Render the circuit as an OpenQASM 3.0 program.
    pub fn to_qasm(&self) -> String {
        let mut qasm = String::from("OPENQASM 3.0;\n");
        qasm.push_str("include \"stdgates.inc\";\n");
        let _ = writeln!(qasm, "qubit[{}] q;", self.num_qubits);
        if self.num_clbits > 0 {
            let _ = writeln!(qasm, "bit[{}] c;", self.num_clbits);
        }
        qasm.push('\n');

        for gate in &self.gates {
            let _ = writeln!(qasm, "{};", gate);
        }

        qasm
    }
}
