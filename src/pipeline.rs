// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Single-shot encode, extract, correct run.
//!
//! ```text
//! create_steane_code()      syndrome_circuit()
//!         │                        │
//!         │                  backend (N shots)
//!         │                        │
//!         │              most frequent outcome
//!         │                        │
//!         └──── Corrector ◄── Syndrome
//! ```
//!
//! Steps run strictly in sequence. The corrected encoder circuit is returned
//! in the report; it is never executed.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::backend::{ExecuteCircuitRequest, QuantumBackend};
use crate::circuit::Circuit;
use crate::code::steane::{create_steane_code, syndrome_circuit};
use crate::config::Config;
use crate::correction::{Correction, Corrector, UnmappedPolicy};
use crate::error::Result;
use crate::syndrome::Syndrome;
use crate::validation::validate_execute_request;

/// Parameters for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Shots for the syndrome measurement
    pub shots: u32,
    /// Handling of syndromes with no table entry
    pub policy: UnmappedPolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            shots: 1,
            policy: UnmappedPolicy::default(),
        }
    }
}

impl RunOptions {
    /// Options taken from the execution and correction sections.
    pub fn from_config(config: &Config) -> Self {
        Self {
            shots: config.execution.shots,
            policy: config.correction.unmapped,
        }
    }
}

/// Everything observed during one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique run identifier
    pub run_id: Uuid,
    /// Backend that executed the syndrome circuit
    pub backend: String,
    /// Shots executed
    pub shots: u32,
    /// Raw outcome counts
    pub counts: HashMap<String, u32>,
    /// Syndrome the correction was chosen from
    pub syndrome: Syndrome,
    /// Table entry that was applied
    pub correction: Correction,
    /// Encoder circuit after correction
    pub encoder: Circuit,
    /// Circuit submitted to the backend
    pub syndrome_circuit: Circuit,
}

/// Encode, measure the syndrome on `backend`, and correct the encoder circuit.
///
/// The request is checked against the backend's own resource limits before
/// anything is submitted.
pub async fn run(backend: &dyn QuantumBackend, options: &RunOptions) -> Result<RunReport> {
    let run_id = Uuid::new_v4();

    let mut encoder = create_steane_code();
    let extraction = syndrome_circuit()?;
    validate_execute_request(&extraction, options.shots, backend.resource_limits())?;

    info!(
        %run_id,
        backend = backend.name(),
        shots = options.shots,
        "Measuring Steane syndrome"
    );

    let result = backend
        .execute_circuit(ExecuteCircuitRequest {
            circuit: extraction.clone(),
            shots: options.shots,
        })
        .await?;

    let syndrome: Syndrome = result.outcome()?.parse()?;
    let correction = Corrector::new(options.policy).apply(&mut encoder, syndrome)?;

    info!(%run_id, %syndrome, %correction, "Run complete");

    Ok(RunReport {
        run_id,
        backend: backend.name().to_string(),
        shots: result.shots,
        counts: result.counts,
        syndrome,
        correction,
        encoder,
        syndrome_circuit: extraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendRegistry, FixedOutcomeBackend};
    use crate::circuit::Gate;
    use crate::config::ResourceLimits;
    use crate::error::{BackendError, Error, SyndromeError, ValidationError};
    use crate::test_utils::MockBackend;

    #[tokio::test]
    async fn test_end_to_end_bit_flip_on_qubit_zero() {
        let backend = MockBackend::with_counts("stub", &[("0000001", 1)]);
        let report = run(&backend, &RunOptions::default()).await.unwrap();

        assert_eq!(report.syndrome.to_string(), "0000001");
        assert_eq!(report.correction, Correction::BitFlip { qubit: 0 });
        assert_eq!(report.encoder.len(), 12);
        assert_eq!(report.encoder.gates()[..11], create_steane_code().gates()[..]);
        assert_eq!(report.encoder.last(), Some(&Gate::X { qubit: 0 }));
    }

    #[tokio::test]
    async fn test_submits_syndrome_circuit_once() {
        let backend = MockBackend::with_counts("stub", &[("0000000", 1)]);
        run(&backend, &RunOptions::default()).await.unwrap();

        let submitted = backend.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0], syndrome_circuit().unwrap());
    }

    #[tokio::test]
    async fn test_trivial_syndrome_leaves_encoder_unchanged() {
        let backend = FixedOutcomeBackend::new("0000000").unwrap();
        let report = run(&backend, &RunOptions::default()).await.unwrap();

        assert_eq!(report.correction, Correction::Trivial);
        assert_eq!(report.encoder, create_steane_code());
        assert_eq!(report.backend, "fixed_outcome");
    }

    #[tokio::test]
    async fn test_unmapped_syndrome_ignored_by_default() {
        let backend = FixedOutcomeBackend::new("1111111").unwrap();
        let report = run(&backend, &RunOptions::default()).await.unwrap();

        assert!(matches!(report.correction, Correction::Unmapped { .. }));
        assert_eq!(report.encoder.len(), 11);
    }

    #[tokio::test]
    async fn test_unmapped_syndrome_rejected() {
        let backend = FixedOutcomeBackend::new("1111111").unwrap();
        let options = RunOptions {
            policy: UnmappedPolicy::Reject,
            ..Default::default()
        };
        let err = run(&backend, &options).await.unwrap_err();
        assert!(matches!(err, Error::Syndrome(SyndromeError::Unmapped(_))));
    }

    #[tokio::test]
    async fn test_empty_result_set() {
        let backend = MockBackend::with_counts("empty", &[]);
        let err = run(&backend, &RunOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Syndrome(SyndromeError::EmptyResultSet)));
    }

    #[tokio::test]
    async fn test_malformed_outcome() {
        let backend = MockBackend::with_counts("narrow", &[("01", 1)]);
        let err = run(&backend, &RunOptions::default()).await.unwrap_err();
        assert!(matches!(err, Error::Syndrome(SyndromeError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_multi_shot_uses_most_frequent_outcome() {
        let backend = MockBackend::with_counts("noisy", &[("0000010", 6), ("0000001", 4)]);
        let options = RunOptions {
            shots: 10,
            ..Default::default()
        };
        let report = run(&backend, &options).await.unwrap();
        assert_eq!(report.correction, Correction::BitFlip { qubit: 1 });
        assert_eq!(report.shots, 10);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = MockBackend::failing("broken");
        let err = run(&backend, &RunOptions::default()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Backend(BackendError::ExecutionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected_before_submission() {
        let backend = MockBackend::with_counts("stub", &[("0000001", 1)]);
        let options = RunOptions {
            shots: 0,
            ..Default::default()
        };
        let err = run(&backend, &options).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Field { .. })));
        assert!(backend.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_raised_shot_limit_reaches_default_backend() {
        let mut config = Config::default();
        config.validation.limits.max_shots = 200_000;
        config.execution.shots = 150_000;
        config.validate().unwrap();

        let registry = BackendRegistry::from_config(&config).unwrap();
        let backend = registry.get_default().unwrap();
        let report = run(backend.as_ref(), &RunOptions::from_config(&config))
            .await
            .unwrap();

        assert_eq!(report.shots, 150_000);
        assert_eq!(report.counts.get("0000000"), Some(&150_000));
    }

    #[tokio::test]
    async fn test_backend_limits_checked_before_submission() {
        let mut backend = MockBackend::with_counts("small", &[("0000001", 1)]);
        backend.limits = ResourceLimits {
            max_shots: 4,
            ..Default::default()
        };
        let options = RunOptions {
            shots: 5,
            ..Default::default()
        };

        let err = run(&backend, &options).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::ResourceLimit { .. })
        ));
        assert!(backend.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let backend = FixedOutcomeBackend::new("0000010").unwrap();
        let report = run(&backend, &RunOptions::default()).await.unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["syndrome"], "0000010");
        assert_eq!(json["correction"]["kind"], "bit_flip");
        assert_eq!(json["correction"]["qubit"], 1);
        assert_eq!(json["counts"]["0000010"], 1);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.execution.shots = 3;
        config.correction.unmapped = UnmappedPolicy::Reject;
        let options = RunOptions::from_config(&config);
        assert_eq!(options.shots, 3);
        assert_eq!(options.policy, UnmappedPolicy::Reject);
    }
}
