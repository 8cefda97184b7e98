// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! IBM Quantum backend via Qiskit Runtime REST API.
//!
//! Circuits are submitted to the Runtime sampler as OpenQASM 3.0 and the
//! returned counts are normalised to zero-padded bit-strings.
//!
//! # Architecture
//!
//! The backend is generic over [`IbmHttpClient`], enabling deterministic
//! testing with a mock client while using [`ReqwestIbmClient`] in production
//! (requires the `ibm` feature).

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::r#trait::{
    BackendInfo, BackendType, ExecuteCircuitRequest, HealthStatus, MeasurementResult,
    QuantumBackend,
};
use crate::config::{IbmConfig, ResourceLimits};
use crate::error::BackendError;

pub use client::{IbmHttpClient, ReqwestIbmClient};
#[cfg(test)]
pub use client::MockIbmClient;

/// IBM supported systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbmSystem {
    /// IBM Eagle r3 (127 qubits)
    EagleR3,
    /// IBM Heron (156 qubits)
    Heron,
    /// IBM Qiskit Aer simulator
    #[default]
    AerSimulator,
}

impl IbmSystem {
    /// Number of qubits for this system.
    pub fn num_qubits(&self) -> u32 {
        match self {
            IbmSystem::EagleR3 => 127,
            IbmSystem::Heron => 156,
            IbmSystem::AerSimulator => 100,
        }
    }

    /// IBM backend name string.
    pub fn backend_name(&self) -> &str {
        match self {
            IbmSystem::EagleR3 => "ibm_brisbane",
            IbmSystem::Heron => "ibm_torino",
            IbmSystem::AerSimulator => "aer_simulator",
        }
    }
}

/// IBM job request (Qiskit Runtime sampler format).
#[derive(Debug, Clone, Serialize)]
pub struct IbmJobRequest {
    /// Program ID.
    pub program_id: String,
    /// Backend name.
    pub backend: String,
    /// Input parameters.
    pub params: IbmJobParams,
}

/// IBM job input parameters.
#[derive(Debug, Clone, Serialize)]
pub struct IbmJobParams {
    /// OpenQASM 3.0 circuits.
    pub circuits: Vec<String>,
    /// Number of shots.
    pub shots: u32,
    /// Optimization level (0–3). Zero keeps the submitted gate order.
    pub optimization_level: u32,
}

/// IBM job response.
#[derive(Debug, Deserialize)]
pub struct IbmJobResponse {
    /// Job ID.
    pub id: String,
    /// Job status.
    pub status: String,
}

/// IBM job result.
#[derive(Debug, Clone, Deserialize)]
pub struct IbmJobResult {
    /// Job status.
    pub status: String,
    /// Result data.
    pub results: Option<Vec<IbmCircuitResult>>,
}

/// Result of a single circuit execution.
#[derive(Debug, Clone, Deserialize)]
pub struct IbmCircuitResult {
    /// Measurement counts, keyed by hex (`0x5`) or bit-string.
    pub counts: HashMap<String, u32>,
    /// Total shots.
    pub shots: u32,
}

/// IBM Quantum backend.
pub struct IbmBackend<C: IbmHttpClient = ReqwestIbmClient> {
    name: String,
    config: IbmConfig,
    client: C,
    limits: ResourceLimits,
}

impl IbmBackend<ReqwestIbmClient> {
    /// Create from configuration, enforcing `limits` on every request.
    pub fn from_config(config: &IbmConfig, limits: &ResourceLimits) -> Result<Self, BackendError> {
        if !config.enabled {
            return Err(BackendError::NotFound("IBM backend is disabled".into()));
        }

        let token = config.auth_token.as_deref().ok_or_else(|| {
            BackendError::AuthenticationFailed(
                "IBM API token not configured. Set IBM_QUANTUM_TOKEN or backends.ibm.auth_token"
                    .into(),
            )
        })?;
        let api_url = config
            .api_url
            .as_deref()
            .unwrap_or("https://api.quantum-computing.ibm.com");

        let client = ReqwestIbmClient::new(api_url, token)?;
        Ok(Self::with_client(config, client).with_limits(limits))
    }
}

impl<C: IbmHttpClient> IbmBackend<C> {
    /// Create with a custom HTTP client (for testing).
    pub fn with_client(config: &IbmConfig, client: C) -> Self {
        Self {
            name: format!("ibm_{}", config.system.backend_name()),
            config: config.clone(),
            client,
            limits: ResourceLimits {
                max_qubits: config.system.num_qubits(),
                ..Default::default()
            },
        }
    }

    /// Apply configured limits. The qubit limit never exceeds the system size.
    pub fn with_limits(mut self, limits: &ResourceLimits) -> Self {
        self.limits = ResourceLimits {
            max_qubits: limits.max_qubits.min(self.config.system.num_qubits()),
            ..limits.clone()
        };
        self
    }

    /// Submit a job and wait for completion.
    async fn submit_and_wait(&self, qasm: String, shots: u32) -> Result<IbmJobResult, BackendError> {
        let job_request = IbmJobRequest {
            program_id: "sampler".to_string(),
            backend: self.config.system.backend_name().to_string(),
            params: IbmJobParams {
                circuits: vec![qasm],
                shots,
                optimization_level: 0,
            },
        };

        let job_id = self.client.submit_job(&job_request).await?;
        info!(job_id = %job_id, backend = %self.config.system.backend_name(), "IBM job submitted");

        let timeout = Duration::from_secs(self.config.job_timeout_sec);
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let start = Instant::now();

        loop {
            if start.elapsed() > timeout {
                return Err(BackendError::Timeout(format!(
                    "IBM job {job_id} did not finish within {}s",
                    self.config.job_timeout_sec
                )));
            }

            let result = self.client.get_job_result(&job_id).await?;

            match result.status.as_str() {
                "DONE" | "Completed" => return Ok(result),
                "FAILED" | "CANCELLED" | "ERROR" => {
                    return Err(BackendError::ExecutionFailed(format!(
                        "IBM job {job_id} failed with status: {}",
                        result.status
                    )));
                }
                _ => {
                    debug!(job_id = %job_id, status = %result.status, "IBM job still running");
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }
}

/// Rewrite count keys as zero-padded bit-strings of `width` characters.
///
/// Runtime results may key counts by hex (`"0x5"`) or by bit-strings with
/// register separators (`"000 0101"`).
pub fn normalize_counts(
    counts: HashMap<String, u32>,
    width: usize,
) -> Result<HashMap<String, u32>, BackendError> {
    let mut normalized = HashMap::with_capacity(counts.len());
    for (key, count) in counts {
        let bits = if let Some(hex) = key.strip_prefix("0x") {
            let value = u128::from_str_radix(hex, 16).map_err(|e| {
                BackendError::ExecutionFailed(format!("Bad count key {key:?}: {e}"))
            })?;
            format!("{value:0width$b}")
        } else {
            key.chars().filter(|c| !c.is_whitespace()).collect()
        };

        if bits.len() != width || !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(BackendError::ExecutionFailed(format!(
                "Count key {key:?} does not fit a {width}-bit register"
            )));
        }
        *normalized.entry(bits).or_insert(0) += count;
    }
    Ok(normalized)
}

#[async_trait]
impl<C: IbmHttpClient> QuantumBackend for IbmBackend<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        if self.config.system == IbmSystem::AerSimulator {
            BackendType::Simulator
        } else {
            BackendType::Hardware
        }
    }

    async fn execute_circuit(
        &self,
        request: ExecuteCircuitRequest,
    ) -> Result<MeasurementResult, BackendError> {
        debug!(
            shots = request.shots,
            gates = request.circuit.len(),
            system = ?self.config.system,
            "Executing circuit on IBM backend"
        );

        let max_qubits = self.limits.max_qubits;
        if request.circuit.num_qubits() > max_qubits {
            return Err(BackendError::InvalidRequest(format!(
                "Circuit needs {} qubits, {} allows {}",
                request.circuit.num_qubits(),
                self.config.system.backend_name(),
                max_qubits
            )));
        }
        if request.shots == 0 || request.shots > self.limits.max_shots {
            return Err(BackendError::InvalidRequest(format!(
                "shots must be in 1..={}, got {}",
                self.limits.max_shots, request.shots
            )));
        }

        let width = request.circuit.num_clbits() as usize;
        let result = self
            .submit_and_wait(request.circuit.to_qasm(), request.shots)
            .await?;

        let circuit_result = result
            .results
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| {
                BackendError::ExecutionFailed("No circuit results in IBM response".into())
            })?;

        if circuit_result.shots != request.shots {
            warn!(
                requested = request.shots,
                returned = circuit_result.shots,
                "IBM returned a different shot count"
            );
        }

        Ok(MeasurementResult {
            counts: normalize_counts(circuit_result.counts, width)?,
            shots: circuit_result.shots,
        })
    }

    async fn backend_info(&self) -> Result<BackendInfo, BackendError> {
        Ok(BackendInfo {
            name: self.name.clone(),
            backend_type: self.backend_type(),
            num_qubits: self.config.system.num_qubits(),
            supported_gates: vec!["h".into(), "cx".into(), "x".into(), "measure".into()],
            software_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        match self.client.check_health().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "IBM health check failed");
                Ok(HealthStatus::Unavailable)
            }
        }
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}
