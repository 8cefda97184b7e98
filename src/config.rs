// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run settings.
//!
//! Each layer overrides the one above it:
//!
//! 1. Built-in defaults
//! 2. steane.yaml file
//! 3. Environment variables (STEANE_*, IBM_QUANTUM_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::backend::ibm::IbmSystem;
use crate::correction::UnmappedPolicy;
use crate::error::{Error, Result};
use crate::syndrome::Syndrome;

/// Settings for one `steane-qec` invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Execution settings
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Correction settings
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// Per-backend sections
    #[serde(default)]
    pub backends: BackendsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Defaults, then the YAML file, then `STEANE_*` / `IBM_QUANTUM_*` variables.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            // steane.yaml wins over steane.yml
            for path in &["steane.yaml", "steane.yml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("STEANE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("STEANE_BACKEND") {
            self.execution.backend = Some(val);
        }
        if let Some(val) = lookup("STEANE_SHOTS") {
            if let Ok(shots) = val.parse() {
                self.execution.shots = shots;
            }
        }
        if let Some(val) = lookup("STEANE_UNMAPPED_POLICY") {
            if let Ok(policy) = val.parse() {
                self.correction.unmapped = policy;
            }
        }
        if let Some(val) = lookup("STEANE_FIXED_OUTCOME") {
            self.backends.fixed_outcome.outcome = val;
        }

        // IBM backend
        if let Some(val) = lookup("IBM_QUANTUM_URL") {
            self.backends.ibm.api_url = Some(val);
        }
        if let Some(val) = lookup("IBM_QUANTUM_TOKEN") {
            self.backends.ibm.auth_token = Some(val);
        }
    }

    /// Reject settings a run could not honour.
    pub fn validate(&self) -> Result<()> {
        if self.execution.shots == 0 {
            return Err(Error::Config("shots cannot be 0".into()));
        }
        if self.execution.shots > self.validation.limits.max_shots {
            return Err(Error::Config(format!(
                "shots {} exceeds limit {}",
                self.execution.shots, self.validation.limits.max_shots
            )));
        }
        if self.backends.fixed_outcome.enabled {
            self.backends
                .fixed_outcome
                .outcome
                .parse::<Syndrome>()
                .map_err(|e| Error::Config(format!("fixed_outcome.outcome: {}", e)))?;
        }
        if !self.backends.fixed_outcome.enabled && !self.backends.ibm.enabled {
            return Err(Error::Config(
                "No backends enabled. At least one backend must be enabled.".into(),
            ));
        }
        if self.execution.shots > 1 {
            tracing::warn!(
                shots = self.execution.shots,
                "More than one shot requested; only the most frequent outcome is corrected"
            );
        }
        Ok(())
    }
}

/// Execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Shots per syndrome measurement
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Backend to run on (registry default if unset)
    #[serde(default)]
    pub backend: Option<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            backend: None,
        }
    }
}

fn default_shots() -> u32 {
    1
}

/// Correction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// Handling of syndromes with no table entry
    #[serde(default)]
    pub unmapped: UnmappedPolicy,
}

fn default_true() -> bool {
    true
}

/// Which backends `BackendRegistry::from_config` builds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Fixed-outcome stub backend
    #[serde(default)]
    pub fixed_outcome: FixedOutcomeConfig,

    /// IBM Quantum Runtime backend
    #[serde(default)]
    pub ibm: IbmConfig,
}

/// Fixed-outcome backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedOutcomeConfig {
    /// Register this backend
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Make it the registry default
    #[serde(default = "default_true")]
    pub default: bool,

    /// Bit-string reported for every shot
    #[serde(default = "default_outcome")]
    pub outcome: String,
}

impl Default for FixedOutcomeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default: true,
            outcome: default_outcome(),
        }
    }
}

fn default_outcome() -> String {
    "0000000".into()
}

/// IBM backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbmConfig {
    /// Register this backend
    #[serde(default)]
    pub enabled: bool,

    /// IBM Quantum API URL
    #[serde(default = "default_ibm_url")]
    pub api_url: Option<String>,

    /// API token
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Target system
    #[serde(default)]
    pub system: IbmSystem,

    /// Job timeout in seconds
    #[serde(default = "default_job_timeout")]
    pub job_timeout_sec: u64,

    /// Delay between job status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for IbmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_ibm_url(),
            auth_token: None,
            system: IbmSystem::default(),
            job_timeout_sec: default_job_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_ibm_url() -> Option<String> {
    Some("https://api.quantum-computing.ibm.com".into())
}

fn default_job_timeout() -> u64 {
    300
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

/// tracing-subscriber settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Pre-submission checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Handed to every backend built from this config
    #[serde(default)]
    pub limits: ResourceLimits,
}

/// Upper bounds a backend accepts for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum qubits
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Maximum shots
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Maximum gates per circuit
    #[serde(default = "default_max_gates")]
    pub max_gates: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            max_shots: default_max_shots(),
            max_gates: default_max_gates(),
        }
    }
}

fn default_max_qubits() -> u32 {
    32
}

fn default_max_shots() -> u32 {
    100_000
}

fn default_max_gates() -> u32 {
    10_000
}
