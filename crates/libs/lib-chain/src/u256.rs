//! # 256-bit Wire Codec
//!
//! Converts between arbitrary-precision 256-bit integers and the two-limb
//! (low/high 128-bit) representation the protocol contracts expect in
//! calldata and read results.
//!
//! All arithmetic here is integer-exact. Floating point never appears on
//! the wire path; the lossy display conversions live in [`crate::scale`].

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Two-limb wire encoding of a 256-bit unsigned integer.
///
/// The represented value is `low + high * 2^128`. Both limbs are serialized
/// as decimal strings because JSON numbers cannot carry 128 bits.
///
/// # Example
///
/// ```rust
/// use lib_chain::u256::WireU256;
/// use primitive_types::U256;
///
/// let w = WireU256::from_u256(U256::from(12_500_000u64));
/// assert_eq!(w.low, 12_500_000);
/// assert_eq!(w.high, 0);
/// assert_eq!(w.to_u256(), U256::from(12_500_000u64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireU256 {
    /// Low 128 bits, value in `[0, 2^128)`.
    #[serde(with = "dec_string")]
    pub low: u128,
    /// High 128 bits, value in `[0, 2^128)`.
    #[serde(with = "dec_string")]
    pub high: u128,
}

impl WireU256 {
    /// Split a 256-bit value into its wire limbs.
    ///
    /// Total for every `U256`; the host type enforces the `[0, 2^256)`
    /// range, so out-of-range failures surface earlier, at the
    /// human-to-base-unit conversion in [`crate::scale`].
    pub fn from_u256(value: U256) -> Self {
        Self {
            low: value.low_u128(),
            high: (value >> 128).low_u128(),
        }
    }

    /// Rejoin the limbs into the exact 256-bit value.
    pub fn to_u256(&self) -> U256 {
        (U256::from(self.high) << 128) | U256::from(self.low)
    }

    /// Render the limbs as calldata fields, low then high.
    ///
    /// The limb order is a contract-level convention shared by every
    /// `u256` argument in the protocol ABI.
    pub fn to_calldata(&self) -> [String; 2] {
        [self.low.to_string(), self.high.to_string()]
    }

    /// Parse a wire value from its two calldata fields (low, high).
    pub fn from_calldata(low: &str, high: &str) -> Result<Self, ChainError> {
        Ok(Self {
            low: parse_limb(low)?,
            high: parse_limb(high)?,
        })
    }
}

impl From<U256> for WireU256 {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<WireU256> for U256 {
    fn from(wire: WireU256) -> Self {
        wire.to_u256()
    }
}

fn parse_limb(s: &str) -> Result<u128, ChainError> {
    s.parse::<u128>()
        .map_err(|_| ChainError::Decode(format!("invalid u128 limb: {s:?}")))
}

/// Serde helpers for u128 limbs carried as decimal strings.
mod dec_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(v: U256) -> U256 {
        WireU256::from_u256(v).to_u256()
    }

    #[test]
    fn test_roundtrip_small_values() {
        for v in [0u64, 1, 42, 12_500_000, u64::MAX] {
            assert_eq!(roundtrip(U256::from(v)), U256::from(v));
        }
    }

    #[test]
    fn test_roundtrip_across_limb_boundary() {
        let just_below = U256::from(u128::MAX);
        let just_above = U256::from(u128::MAX) + U256::from(1u8);
        assert_eq!(roundtrip(just_below), just_below);
        assert_eq!(roundtrip(just_above), just_above);

        let w = WireU256::from_u256(just_above);
        assert_eq!(w.low, 0);
        assert_eq!(w.high, 1);
    }

    #[test]
    fn test_roundtrip_max_value() {
        assert_eq!(roundtrip(U256::MAX), U256::MAX);
        let w = WireU256::from_u256(U256::MAX);
        assert_eq!(w.low, u128::MAX);
        assert_eq!(w.high, u128::MAX);
    }

    #[test]
    fn test_calldata_limb_order_low_then_high() {
        let w = WireU256::from_u256(U256::from(50_000_000u64));
        assert_eq!(w.to_calldata(), ["50000000".to_string(), "0".to_string()]);
    }

    #[test]
    fn test_from_calldata_rejects_garbage() {
        assert!(WireU256::from_calldata("12", "0").is_ok());
        assert!(WireU256::from_calldata("-1", "0").is_err());
        assert!(WireU256::from_calldata("abc", "0").is_err());
        assert!(WireU256::from_calldata("", "").is_err());
    }

    #[test]
    fn test_serde_limbs_as_decimal_strings() {
        let w = WireU256::from_u256(U256::from(12_500_000u64));
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"low":"12500000","high":"0"}"#);

        let back: WireU256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }
}
