// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! What the pipeline needs from a backend.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use crate::circuit::Circuit;
use crate::config::ResourceLimits;
use crate::error::{BackendError, SyndromeError};

/// Simulator or real device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Simulator,
    /// Real quantum hardware
    Hardware,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Simulator => write!(f, "simulator"),
            BackendType::Hardware => write!(f, "hardware"),
        }
    }
}

/// Result of [`QuantumBackend::health_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Accepting jobs
    Healthy,
    /// Not accepting jobs
    Unavailable,
}

/// Circuit execution request.
#[derive(Debug, Clone)]
pub struct ExecuteCircuitRequest {
    /// Circuit to run; must contain measurements
    pub circuit: Circuit,
    /// Number of shots
    pub shots: u32,
}

/// Measurement outcome counts from one circuit execution.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementResult {
    /// Bitstring counts (e.g., {"0000000": 1}); rightmost character is classical bit 0
    pub counts: HashMap<String, u32>,
    /// Shots executed
    pub shots: u32,
}

impl MeasurementResult {
    /// The most frequent outcome.
    ///
    /// Ties go to the lexicographically smallest bit-string so the choice does
    /// not depend on map iteration order.
    pub fn outcome(&self) -> Result<&str, SyndromeError> {
        self.counts
            .iter()
            .max_by(|(a_key, a_count), (b_key, b_count)| {
                a_count.cmp(b_count).then_with(|| b_key.cmp(a_key))
            })
            .map(|(key, _)| key.as_str())
            .ok_or(SyndromeError::EmptyResultSet)
    }
}

/// Static description of a backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    /// Backend name
    pub name: String,
    /// Type of backend
    pub backend_type: BackendType,
    /// Number of qubits
    pub num_qubits: u32,
    /// Supported gate mnemonics
    pub supported_gates: Vec<String>,
    /// Software version
    pub software_version: String,
}

/// Executes measured circuits.
///
/// The core only needs one thing from a backend: run a measured circuit for
/// some number of shots and report how often each classical outcome occurred.
#[async_trait]
pub trait QuantumBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Execute a circuit and return measurement counts.
    async fn execute_circuit(
        &self,
        request: ExecuteCircuitRequest,
    ) -> Result<MeasurementResult, BackendError>;

    /// Get backend information.
    async fn backend_info(&self) -> Result<BackendInfo, BackendError>;

    /// Check backend health.
    async fn health_check(&self) -> Result<HealthStatus, BackendError>;

    /// Get resource limits.
    fn resource_limits(&self) -> &ResourceLimits;
}
