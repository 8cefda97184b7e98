// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Syndrome-to-correction lookup.
//!
//! The table defines bit-flip corrections for two syndromes only. Every other
//! non-zero syndrome maps to [`Correction::Unmapped`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::circuit::Circuit;
use crate::error::{Result, SyndromeError};
use crate::syndrome::Syndrome;

/// Outcome of looking a syndrome up in the correction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correction {
    /// All parity checks passed; nothing to do.
    Trivial,
    /// Apply a Pauli X to `qubit`.
    BitFlip { qubit: u32 },
    /// No correction is defined for this syndrome.
    Unmapped { syndrome: Syndrome },
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::Trivial => write!(f, "none (trivial syndrome)"),
            Correction::BitFlip { qubit } => write!(f, "x q[{}]", qubit),
            Correction::Unmapped { syndrome } => write!(f, "none (unmapped syndrome {})", syndrome),
        }
    }
}

/// Look a syndrome up in the correction table.
pub fn lookup(syndrome: Syndrome) -> Correction {
    match syndrome.bits() {
        0 => Correction::Trivial,
        0b000_0001 => Correction::BitFlip { qubit: 0 },
        0b000_0010 => Correction::BitFlip { qubit: 1 },
        _ => Correction::Unmapped { syndrome },
    }
}

/// Apply the table entry for `syndrome` to `qc`, appending at most one X gate.
///
/// Unmapped syndromes append nothing. Repeating a matched correction appends
/// another X; prior corrections are not inspected.
pub fn correct_errors(qc: &mut Circuit, syndrome: Syndrome) -> Result<Correction> {
    Corrector::default().apply(qc, syndrome)
}

/// What to do with a syndrome the table does not cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Leave the circuit untouched and carry on.
    #[default]
    Ignore,
    /// Fail with [`SyndromeError::Unmapped`].
    Reject,
}

impl std::str::FromStr for UnmappedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(UnmappedPolicy::Ignore),
            "reject" => Ok(UnmappedPolicy::Reject),
            other => Err(format!("unknown unmapped-syndrome policy: {}", other)),
        }
    }
}

/// Applies table corrections under an [`UnmappedPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Corrector {
    policy: UnmappedPolicy,
}

impl Corrector {
    /// Create a corrector with the given policy.
    pub fn new(policy: UnmappedPolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect.
    pub fn policy(&self) -> UnmappedPolicy {
        self.policy
    }

    /// Look up `syndrome` and append the matching correction to `qc`.
    pub fn apply(&self, qc: &mut Circuit, syndrome: Syndrome) -> Result<Correction> {
        let correction = lookup(syndrome);
        match correction {
            Correction::Trivial => {
                debug!(%syndrome, "Trivial syndrome, no correction");
            }
            Correction::BitFlip { qubit } => {
                qc.x(qubit)?;
                info!(%syndrome, qubit, "Applied bit-flip correction");
            }
            Correction::Unmapped { syndrome } => match self.policy {
                UnmappedPolicy::Ignore => {
                    warn!(%syndrome, "No correction defined for syndrome, ignoring");
                }
                UnmappedPolicy::Reject => {
                    return Err(SyndromeError::Unmapped(syndrome).into());
                }
            },
        }
        Ok(correction)
    }
}
