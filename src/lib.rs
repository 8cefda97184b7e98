// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Steane [[7,1,3]] code toolkit
//!
//! This crate builds the Steane encoder and syndrome-extraction circuits,
//! runs the extraction on a pluggable quantum backend, and applies a
//! lookup-table correction to the encoder circuit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          steane-qec CLI / pipeline       │
//! ├──────────────────┬──────────────────────┤
//! │  code::steane    │   correction         │
//! │  (circuits)      │   (syndrome table)   │
//! ├──────────────────┴──────────────────────┤
//! │           Backend Registry               │
//! ├────────────────┬────────────────────────┤
//! │ Fixed outcome  │     IBM Backend        │
//! │ (stub)         │     (reqwest)          │
//! └────────────────┴────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`circuit`]: Gate list circuits, text drawing and OpenQASM export
//! - [`code`]: Steane encoder and syndrome extraction
//! - [`syndrome`]: Seven-bit syndrome values
//! - [`correction`]: Syndrome lookup table and corrector
//! - [`backend`]: Where syndrome circuits run: trait, registry, stub and IBM
//! - [`pipeline`]: Encode, measure, correct in one call
//! - [`config`]: Layered YAML, environment and flag settings
//! - [`validation`]: Request and register checks before submission
//! - [`error`]: Crate error enums

pub mod backend;
pub mod circuit;
pub mod code;
pub mod config;
pub mod correction;
pub mod error;
pub mod pipeline;
pub mod syndrome;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
