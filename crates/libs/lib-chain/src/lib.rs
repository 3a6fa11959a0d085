//! # Chain Marshaling Library
//!
//! Wire-level marshaling for the RateForge protocol: 256-bit integer codec,
//! decimal scaling, address formatting, and typed multicall batches.
//!
//! This crate is deliberately network-free. Everything here is exact,
//! synchronous value manipulation; the client crate owns the RPC surface.

// Declare all modules
pub mod address;
pub mod call;
pub mod error;
pub mod scale;
pub mod u256;

// Re-export commonly used types from root for convenience
pub use address::Address;
pub use call::{
    BlockTimestamp, Call, ContractCall, OracleRefresh, SwapIntent, SwapSide, TransactionBatch,
};
pub use error::ChainError;
pub use u256::WireU256;

// The backing big-integer type, re-exported so callers do not need their
// own primitive-types dependency pin.
pub use primitive_types::U256;
