// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Named lookup of the backends a run can target.
//!
//! The registry maps backend names to shared [`QuantumBackend`] handles and
//! tracks which one runs circuits when no name is given.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::ibm::IbmBackend;
use super::{BackendType, FixedOutcomeBackend, QuantumBackend};
use crate::config::Config;
use crate::error::{BackendError, Error, Result};

/// Name to backend map plus the name used when a run does not pick one.
///
/// Interior locking lets one registry be shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use steane_qec::backend::{BackendRegistry, FixedOutcomeBackend};
///
/// let registry = BackendRegistry::default();
/// let backend = FixedOutcomeBackend::new("0000000").unwrap();
/// registry.register(Arc::new(backend));
///
/// assert_eq!(registry.get_default().unwrap().name(), "fixed_outcome");
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    /// Keyed by `QuantumBackend::name`
    backends: RwLock<BTreeMap<String, Arc<dyn QuantumBackend>>>,

    /// Target of `get_default`
    default_backend: RwLock<Option<String>>,
}

impl BackendRegistry {
    /// Build a registry holding every backend enabled in `config`.
    ///
    /// A backend that fails to initialise is logged and skipped; the call
    /// only fails if nothing could be registered.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Self::default();
        let backends = &config.backends;
        let limits = &config.validation.limits;

        if backends.fixed_outcome.enabled {
            match FixedOutcomeBackend::from_config(&backends.fixed_outcome, limits) {
                Ok(backend) => {
                    registry.register(Arc::new(backend));
                    if backends.fixed_outcome.default {
                        registry.set_default(super::fixed::FIXED_OUTCOME_NAME)?;
                    }
                }
                Err(e) => error!(error = %e, "Skipping fixed-outcome backend"),
            }
        }

        if backends.ibm.enabled {
            match IbmBackend::from_config(&backends.ibm, limits) {
                Ok(backend) => {
                    registry.register(Arc::new(backend));
                }
                Err(e) => error!(error = %e, "Skipping IBM backend"),
            }
        }

        if registry.is_empty() {
            return Err(Error::Config(
                "no backend could be built from the configuration".to_string(),
            ));
        }

        Ok(registry)
    }

    /// Add `backend`, replacing any entry with the same name. The first
    /// backend added becomes the default.
    pub fn register(&self, backend: Arc<dyn QuantumBackend>) {
        let name = backend.name().to_string();
        info!(backend = %name, backend_type = %backend.backend_type(), "Registering backend");

        self.backends.write().insert(name.clone(), backend);

        let mut default = self.default_backend.write();
        if default.is_none() {
            debug!(backend = %name, "First backend is the default");
            *default = Some(name);
        }
    }

    /// Point the default at a registered backend.
    pub fn set_default(&self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(BackendError::NotFound(name.to_string()).into());
        }

        *self.default_backend.write() = Some(name.to_string());
        info!(backend = %name, "Default backend changed");
        Ok(())
    }

    /// Backend registered as `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn QuantumBackend>> {
        self.backends
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(name.to_string()).into())
    }

    /// Backend used when none is named.
    pub fn get_default(&self) -> Result<Arc<dyn QuantumBackend>> {
        let default = self.default_backend.read().clone();
        match default {
            Some(name) => self.get(&name),
            None => Err(BackendError::NotFound("no default backend".to_string()).into()),
        }
    }

    /// `name` if given, else the default.
    pub fn get_or_default(&self, name: Option<&str>) -> Result<Arc<dyn QuantumBackend>> {
        match name {
            Some(n) => self.get(n),
            None => self.get_default(),
        }
    }

    /// Registered backend names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.backends.read().keys().cloned().collect()
    }

    /// Registered backends with their types, sorted by name.
    pub fn list_with_types(&self) -> Vec<(String, BackendType)> {
        self.backends
            .read()
            .iter()
            .map(|(name, backend)| (name.clone(), backend.backend_type()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.backends.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name `get_default` resolves to.
    pub fn default_backend_name(&self) -> Option<String> {
        self.default_backend.read().clone()
    }
}
