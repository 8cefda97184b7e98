// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quantum error-correcting code circuits.
//!
//! - [`steane`]: the [[7,1,3]] Steane code encoder and syndrome extractor

pub mod steane;

pub use steane::{
    create_steane_code, measure_syndrome, syndrome_circuit, ENCODER_CNOTS, STEANE_QUBITS,
};
