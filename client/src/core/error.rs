//! # Common Error Types
//!
//! Consolidated error handling for the client core.
//!
//! ## Error Categories
//!
//! Errors are categorized by their source:
//!
//! - **NotConnected**: No wallet session, or the session's account is the
//!   zero placeholder address. Reported to the caller; never retried here.
//! - **Codec**: Precision/range failures from the marshaling layer. Always
//!   raised before any network call.
//! - **Rpc**: A contract read or submission failed (revert, transport
//!   error). The underlying message is preserved; the caller owns
//!   user-facing messaging and re-submission. No automatic retry.
//! - **Validation**: Input validation failures.
//!
//! Stale fetch results are deliberately *not* an error: a result arriving
//! for a superseded request generation is silently discarded by the state
//! layer (see [`crate::app::state`]).
//!
//! All failures are local to the operation that caused them; every
//! operation is independently retryable by re-invoking it.

use thiserror::Error;

use lib_chain::ChainError;

/// Application-wide error type covering all failure scenarios in the
/// client core.
#[derive(Debug, Error)]
pub enum AppError {
    /// No usable wallet session.
    ///
    /// Raised when an operation needs an account and either no session
    /// exists or the session's account identifier is the zero/placeholder
    /// address a wallet reports before it is unlocked.
    #[error("wallet not connected")]
    NotConnected,

    /// Marshaling failure: negative, non-finite, or out-of-range amount,
    /// or an undecodable wire value.
    #[error("codec error: {0}")]
    Codec(#[from] ChainError),

    /// Remote failure from the RPC endpoint or the contract itself.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Input validation error.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_preserves_underlying_message() {
        let err = AppError::Rpc("execution reverted: ORACLE_STALE".to_string());
        assert_eq!(err.to_string(), "RPC error: execution reverted: ORACLE_STALE");
    }

    #[test]
    fn test_codec_errors_convert() {
        let err: AppError = ChainError::NonFiniteAmount.into();
        assert!(matches!(err, AppError::Codec(_)));
    }
}
