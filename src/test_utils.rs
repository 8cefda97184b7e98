// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backends with scripted behaviour for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::r#trait::{
    BackendInfo, BackendType, ExecuteCircuitRequest, HealthStatus, MeasurementResult,
    QuantumBackend,
};
use crate::circuit::Circuit;
use crate::config::ResourceLimits;
use crate::error::BackendError;

enum Script {
    Counts(HashMap<String, u32>),
    Fail,
}

/// Backend that answers every execution from a script and keeps each
/// circuit it was given.
pub struct MockBackend {
    pub name: String,
    pub backend_type: BackendType,
    pub limits: ResourceLimits,
    script: Script,
    submitted: Mutex<Vec<Circuit>>,
}

impl MockBackend {
    /// Reports a trivial syndrome for every run.
    pub fn new(name: &str, backend_type: BackendType) -> Self {
        Self {
            name: name.to_string(),
            backend_type,
            limits: ResourceLimits::default(),
            script: Script::Counts(HashMap::from([("0000000".to_string(), 1)])),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn simulator(name: &str) -> Arc<dyn QuantumBackend> {
        Arc::new(Self::new(name, BackendType::Simulator))
    }

    /// Reports `counts` verbatim, whatever the request.
    pub fn with_counts(name: &str, counts: &[(&str, u32)]) -> Self {
        Self {
            script: Script::Counts(counts.iter().map(|&(k, v)| (k.to_string(), v)).collect()),
            ..Self::new(name, BackendType::Simulator)
        }
    }

    /// Every call errors; execution fails, info and health report unavailable.
    pub fn failing(name: &str) -> Self {
        Self {
            script: Script::Fail,
            ..Self::new(name, BackendType::Simulator)
        }
    }

    pub fn submitted(&self) -> Vec<Circuit> {
        self.submitted.lock().clone()
    }

    fn unavailable(&self) -> BackendError {
        BackendError::Unavailable(format!("{} is scripted to fail", self.name))
    }
}

#[async_trait]
impl QuantumBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        self.backend_type
    }

    async fn execute_circuit(
        &self,
        request: ExecuteCircuitRequest,
    ) -> Result<MeasurementResult, BackendError> {
        self.submitted.lock().push(request.circuit);
        match &self.script {
            Script::Counts(counts) => Ok(MeasurementResult {
                counts: counts.clone(),
                shots: request.shots,
            }),
            Script::Fail => Err(BackendError::ExecutionFailed(format!(
                "{} is scripted to fail",
                self.name
            ))),
        }
    }

    async fn backend_info(&self) -> Result<BackendInfo, BackendError> {
        if let Script::Fail = self.script {
            return Err(self.unavailable());
        }
        Ok(BackendInfo {
            name: self.name.clone(),
            backend_type: self.backend_type,
            num_qubits: self.limits.max_qubits,
            supported_gates: vec!["h".into(), "cx".into(), "x".into(), "measure".into()],
            software_version: "test".to_string(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        match self.script {
            Script::Counts(_) => Ok(HealthStatus::Healthy),
            Script::Fail => Err(self.unavailable()),
        }
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}
