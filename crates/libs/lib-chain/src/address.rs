//! # Contract Addresses
//!
//! Opaque field-element identifiers for accounts, tokens, and contracts.
//! Addresses pass through the client unchanged; the only formatting policy
//! is lowercase `0x` hex for display and calldata.

use std::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// A field-element contract or account address.
///
/// Serialized as its lowercase `0x` hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(U256);

impl Address {
    /// The zero/placeholder address, used by wallets to signal "no account".
    pub const ZERO: Address = Address(U256([0, 0, 0, 0]));

    /// Parse an address from a decimal or `0x`-prefixed hex string.
    pub fn parse(s: &str) -> Result<Self, ChainError> {
        let s = s.trim();
        let value = if let Some(hex) = s.strip_prefix("0x") {
            U256::from_str_radix(hex, 16)
                .map_err(|_| ChainError::InvalidAddress(s.to_string()))?
        } else {
            U256::from_dec_str(s).map_err(|_| ChainError::InvalidAddress(s.to_string()))?
        };
        Ok(Self(value))
    }

    /// Whether this is the zero placeholder address.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lowercase hex rendering with a `0x` prefix, no zero padding.
    ///
    /// Derived from the underlying field-element integer, matching the
    /// form the protocol explorer links expect.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }

    /// The address as a decimal calldata field.
    pub fn to_calldata(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<U256> for Address {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_hex()
    }
}

impl TryFrom<String> for Address {
    type Error = ChainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Address::parse(&s)
    }
}
