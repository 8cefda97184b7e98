// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for circuits and execution requests.

use crate::circuit::Circuit;
use crate::config::ResourceLimits;
use crate::error::{Result, ValidationError};

/// Validate a circuit execution request against resource limits.
pub fn validate_execute_request(
    circuit: &Circuit,
    shots: u32,
    limits: &ResourceLimits,
) -> Result<()> {
    if shots == 0 {
        return Err(ValidationError::Field {
            field: "shots".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if shots > limits.max_shots {
        return Err(ValidationError::ResourceLimit {
            resource: "shots".into(),
            limit: limits.max_shots as u64,
            requested: shots as u64,
        }
        .into());
    }

    if circuit.num_qubits() > limits.max_qubits {
        return Err(ValidationError::ResourceLimit {
            resource: "qubits".into(),
            limit: limits.max_qubits as u64,
            requested: circuit.num_qubits() as u64,
        }
        .into());
    }

    if circuit.len() > limits.max_gates as usize {
        return Err(ValidationError::ResourceLimit {
            resource: "gates".into(),
            limit: limits.max_gates as u64,
            requested: circuit.len() as u64,
        }
        .into());
    }

    if circuit.num_clbits() == 0 {
        return Err(ValidationError::Field {
            field: "circuit".into(),
            message: "has no classical register to read results from".into(),
        }
        .into());
    }

    Ok(())
}

/// Check that a circuit has exactly the expected register widths.
pub fn validate_registers(circuit: &Circuit, qubits: u32, clbits: u32) -> Result<()> {
    if circuit.num_qubits() != qubits {
        return Err(ValidationError::RegisterSizeMismatch {
            register: "qubits".into(),
            expected: qubits,
            actual: circuit.num_qubits(),
        }
        .into());
    }

    if circuit.num_clbits() != clbits {
        return Err(ValidationError::RegisterSizeMismatch {
            register: "clbits".into(),
            expected: clbits,
            actual: circuit.num_clbits(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::steane::syndrome_circuit;
    use crate::error::Error;

    #[test]
    fn test_validate_execute_request() {
        let limits = ResourceLimits::default();
        let qc = syndrome_circuit().unwrap();

        // Valid request
        assert!(validate_execute_request(&qc, 1, &limits).is_ok());

        // Zero shots
        assert!(validate_execute_request(&qc, 0, &limits).is_err());

        // Exceeds max shots
        assert!(validate_execute_request(&qc, 10_000_000, &limits).is_err());
    }

    #[test]
    fn test_validate_execute_request_qubit_limit() {
        let limits = ResourceLimits {
            max_qubits: 5,
            ..Default::default()
        };
        let err = validate_execute_request(&syndrome_circuit().unwrap(), 1, &limits).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::ResourceLimit { ref resource, .. }) if resource == "qubits"
        ));
    }

    #[test]
    fn test_validate_execute_request_gate_limit() {
        let limits = ResourceLimits {
            max_gates: 10,
            ..Default::default()
        };
        assert!(validate_execute_request(&syndrome_circuit().unwrap(), 1, &limits).is_err());
    }

    #[test]
    fn test_validate_execute_request_needs_classical_bits() {
        let limits = ResourceLimits::default();
        let qc = Circuit::new(7);
        assert!(validate_execute_request(&qc, 1, &limits).is_err());
    }

    #[test]
    fn test_validate_registers() {
        let qc = Circuit::with_clbits(7, 7);
        assert!(validate_registers(&qc, 7, 7).is_ok());
        assert!(validate_registers(&qc, 7, 6).is_err());

        let err = validate_registers(&Circuit::with_clbits(6, 7), 7, 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Register size mismatch for qubits: expected 7, got 6"
        );
    }
}
