// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Plain-text circuit diagrams.

use super::{Circuit, Gate};

const WIRE: &str = "───";
const CLASSICAL_WIRE: &str = "═══";

impl Circuit {
    /// Draw the circuit as a text diagram, one row per qubit plus one row for
    /// the classical register when present.
    ///
    /// CNOT controls are drawn as `■`, targets as `⊕`, and wires crossed by a
    /// CNOT as `┼`. A measurement shows `M` on the qubit and the destination
    /// bit index on the classical row.
    pub fn draw(&self) -> String {
        let label_width = format!("q{}", self.num_qubits.saturating_sub(1)).len();
        let mut rows: Vec<String> = (0..self.num_qubits)
            .map(|q| format!("{:<label_width$}: ", format!("q{}", q)))
            .collect();
        let mut classical = format!("{:<label_width$}: ", "c");

        for gate in &self.gates {
            for (q, row) in rows.iter_mut().enumerate() {
                row.push_str(cell(gate, q as u32));
            }
            match *gate {
                Gate::Measure { clbit, .. } if clbit < 10 => {
                    classical.push_str(&format!("═{}═", clbit));
                }
                Gate::Measure { .. } => classical.push_str("═╩═"),
                _ => classical.push_str(CLASSICAL_WIRE),
            }
        }

        if self.num_clbits > 0 {
            rows.push(classical);
        }
        rows.join("\n")
    }
}

fn cell(gate: &Gate, q: u32) -> &'static str {
    match *gate {
        Gate::H { qubit } if qubit == q => "─H─",
        Gate::X { qubit } if qubit == q => "─X─",
        Gate::Measure { qubit, .. } if qubit == q => "─M─",
        Gate::Cx { control, .. } if control == q => "─■─",
        Gate::Cx { target, .. } if target == q => "─⊕─",
        Gate::Cx { control, target } if q > control.min(target) && q < control.max(target) => {
            "─┼─"
        }
        _ => WIRE,
    }
}
