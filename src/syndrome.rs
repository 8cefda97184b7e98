// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Seven-bit syndrome value.
//!
//! A syndrome is the classical outcome of one syndrome-extraction shot. It is
//! written the way backends report counts: most significant classical bit
//! first, so the rightmost character is classical bit 0.
//!
//! ```
//! use steane_qec::syndrome::Syndrome;
//!
//! let s: Syndrome = "0000010".parse().unwrap();
//! assert_eq!(s.bits(), 2);
//! assert!(s.bit(1));
//! assert_eq!(s.to_string(), "0000010");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SyndromeError;

/// Number of classical bits in a Steane syndrome.
pub const SYNDROME_BITS: usize = 7;

const MAX_VALUE: u8 = (1 << SYNDROME_BITS) - 1;

/// A 7-bit syndrome in `0..=127`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Syndrome(u8);

impl Syndrome {
    /// The all-zero syndrome (no parity check fired).
    pub const TRIVIAL: Syndrome = Syndrome(0);

    /// Build from a raw value; `None` if it does not fit in 7 bits.
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits <= MAX_VALUE).then_some(Self(bits))
    }

    /// Raw value, classical bit `i` at bit position `i`.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether classical bit `index` is set. Out-of-range indices read as unset.
    pub fn bit(self, index: usize) -> bool {
        index < SYNDROME_BITS && (self.0 >> index) & 1 == 1
    }

    /// Number of set bits.
    pub fn weight(self) -> u32 {
        self.0.count_ones()
    }

    /// True for the all-zero syndrome.
    pub fn is_trivial(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = SYNDROME_BITS)
    }
}

impl FromStr for Syndrome {
    type Err = SyndromeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != SYNDROME_BITS || !s.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(SyndromeError::Malformed(s.to_string()));
        }
        let value = s
            .bytes()
            .fold(0u8, |acc, b| (acc << 1) | u8::from(b == b'1'));
        Ok(Self(value))
    }
}

impl TryFrom<String> for Syndrome {
    type Error = SyndromeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Syndrome> for String {
    fn from(s: Syndrome) -> Self {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rightmost_char_is_bit_zero() {
        let s: Syndrome = "0000001".parse().unwrap();
        assert_eq!(s.bits(), 1);
        assert!(s.bit(0));
        assert!(!s.bit(6));

        let s: Syndrome = "1000000".parse().unwrap();
        assert_eq!(s.bits(), 64);
        assert!(s.bit(6));
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(Syndrome::TRIVIAL.to_string(), "0000000");
        assert_eq!(Syndrome::from_bits(5).unwrap().to_string(), "0000101");
        assert_eq!(Syndrome::from_bits(127).unwrap().to_string(), "1111111");
    }

    #[test]
    fn test_from_bits_rejects_eighth_bit() {
        assert!(Syndrome::from_bits(127).is_some());
        assert!(Syndrome::from_bits(128).is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            "000001".parse::<Syndrome>(),
            Err(SyndromeError::Malformed(_))
        ));
        assert!("00000010".parse::<Syndrome>().is_err());
        assert!("".parse::<Syndrome>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        assert!("00000a1".parse::<Syndrome>().is_err());
        assert!("0x00001".parse::<Syndrome>().is_err());
    }

    #[test]
    fn test_weight_and_trivial() {
        let s: Syndrome = "1010001".parse().unwrap();
        assert_eq!(s.weight(), 3);
        assert!(!s.is_trivial());
        assert!(Syndrome::TRIVIAL.is_trivial());
    }

    #[test]
    fn test_bit_out_of_range_is_unset() {
        let s = Syndrome::from_bits(127).unwrap();
        assert!(!s.bit(7));
    }

    #[test]
    fn test_serde_as_string() {
        let s: Syndrome = "0000010".parse().unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"0000010\"");

        let back: Syndrome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);

        assert!(serde_json::from_str::<Syndrome>("\"2\"").is_err());
    }
}
