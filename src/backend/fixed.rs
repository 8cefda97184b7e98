// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed-outcome backend.
//!
//! Reports the same configured bit-string for every shot without simulating
//! anything. It stands in for a local simulator when a deterministic
//! syndrome is wanted, e.g. to exercise a particular table entry end to end.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use super::r#trait::{
    BackendInfo, BackendType, ExecuteCircuitRequest, HealthStatus, MeasurementResult,
    QuantumBackend,
};
use crate::config::{FixedOutcomeConfig, ResourceLimits};
use crate::error::BackendError;

/// Registry name of the fixed-outcome backend.
pub const FIXED_OUTCOME_NAME: &str = "fixed_outcome";

/// Backend that always measures the same outcome.
#[derive(Debug, Clone)]
pub struct FixedOutcomeBackend {
    outcome: String,
    limits: ResourceLimits,
}

impl FixedOutcomeBackend {
    /// Create a backend reporting `outcome` for every shot.
    ///
    /// The outcome must be a non-empty string over `{'0','1'}`.
    pub fn new(outcome: impl Into<String>) -> Result<Self, BackendError> {
        let outcome = outcome.into();
        if outcome.is_empty() || !outcome.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(BackendError::InvalidRequest(format!(
                "fixed outcome must be a binary string, got {:?}",
                outcome
            )));
        }
        Ok(Self {
            outcome,
            limits: ResourceLimits::default(),
        })
    }

    /// Create from configuration, enforcing `limits` on every request.
    pub fn from_config(
        config: &FixedOutcomeConfig,
        limits: &ResourceLimits,
    ) -> Result<Self, BackendError> {
        Ok(Self::new(config.outcome.clone())?.with_limits(limits.clone()))
    }

    /// Replace the resource limits.
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Outcome reported for every shot.
    pub fn outcome(&self) -> &str {
        &self.outcome
    }
}

#[async_trait]
impl QuantumBackend for FixedOutcomeBackend {
    fn name(&self) -> &str {
        FIXED_OUTCOME_NAME
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Simulator
    }

    async fn execute_circuit(
        &self,
        request: ExecuteCircuitRequest,
    ) -> Result<MeasurementResult, BackendError> {
        let clbits = request.circuit.num_clbits() as usize;
        if clbits != self.outcome.len() {
            return Err(BackendError::InvalidRequest(format!(
                "circuit has {} classical bits, fixed outcome has {}",
                clbits,
                self.outcome.len()
            )));
        }
        if request.shots == 0 || request.shots > self.limits.max_shots {
            return Err(BackendError::InvalidRequest(format!(
                "shots must be in 1..={}, got {}",
                self.limits.max_shots, request.shots
            )));
        }
        if request.circuit.num_qubits() > self.limits.max_qubits {
            return Err(BackendError::InvalidRequest(format!(
                "circuit uses {} qubits, limit is {}",
                request.circuit.num_qubits(),
                self.limits.max_qubits
            )));
        }

        debug!(
            outcome = %self.outcome,
            shots = request.shots,
            gates = request.circuit.len(),
            "Reporting fixed outcome"
        );

        let mut counts = HashMap::new();
        counts.insert(self.outcome.clone(), request.shots);
        Ok(MeasurementResult {
            counts,
            shots: request.shots,
        })
    }

    async fn backend_info(&self) -> Result<BackendInfo, BackendError> {
        Ok(BackendInfo {
            name: FIXED_OUTCOME_NAME.to_string(),
            backend_type: BackendType::Simulator,
            num_qubits: self.limits.max_qubits,
            supported_gates: ["h", "cx", "x", "measure"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus::Healthy)
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}
