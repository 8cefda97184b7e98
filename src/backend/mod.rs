// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Targets for the syndrome circuit.
//!
//! [`QuantumBackend`] is implemented by:
//!
//! - `fixed::FixedOutcomeBackend`: deterministic stub reporting one configured outcome
//! - `ibm::IbmBackend`: IBM Quantum Runtime (HTTP client requires the `ibm` feature)

pub mod fixed;
pub mod ibm;
pub mod registry;
pub mod r#trait;

pub use fixed::FixedOutcomeBackend;
pub use r#trait::{
    BackendInfo, BackendType, ExecuteCircuitRequest, HealthStatus, MeasurementResult,
    QuantumBackend,
};
pub use registry::BackendRegistry;
