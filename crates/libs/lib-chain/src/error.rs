//! # Marshaling Errors
//!
//! Error type for the wire codec, decimal scaler, and call encoding.
//!
//! Every failure here is raised before any network traffic happens; the
//! client treats these as precision/range rejections, not remote failures.

use thiserror::Error;

/// Errors raised while marshaling values to or from the wire.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChainError {
    /// A scaled amount does not fit in 256 bits.
    #[error("amount out of range: {0}")]
    Range(String),

    /// A human amount was negative. Base units are unsigned.
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(f64),

    /// A human amount was NaN or infinite.
    #[error("amount must be finite")]
    NonFiniteAmount,

    /// A wire field could not be parsed.
    #[error("failed to decode wire value: {0}")]
    Decode(String),

    /// An address string was neither decimal nor 0x-prefixed hex.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
