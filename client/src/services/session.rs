//! # Wallet Session
//!
//! Explicit session object threaded through every operation that needs an
//! account: the account identifier plus the submission capability. Nothing
//! in the core reads ambient wallet state; a session is obtained once at
//! the UI boundary and passed down.
//!
//! Submission semantics: writes for one account are never issued
//! concurrently from this layer - a submission blocks its triggering
//! action until it resolves or fails, and a failure surfaces to the caller
//! for explicit re-submission. There is no automatic retry.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use lib_chain::{Address, TransactionBatch};

use crate::core::error::{AppError, Result};
use crate::services::rpc::RpcClient;

/// Wallet connection status, as tracked by the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// Not connected
    Disconnected,
    /// Connected with an account address
    Connected(Address),
    /// Connecting in progress
    Connecting,
    /// Error state with message
    Error(String),
}

impl SessionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionStatus::Connected(_))
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            SessionStatus::Connected(addr) => Some(*addr),
            _ => None,
        }
    }
}

/// Capability to submit an atomic call batch for an account.
///
/// The concrete implementation signs and submits through the RPC
/// endpoint; tests substitute a recorder.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit the batch as one indivisible multicall. Returns the
    /// transaction hash.
    async fn execute(&self, account: Address, batch: &TransactionBatch) -> Result<String>;
}

/// An authenticated wallet session: account identity plus submission.
pub struct Session {
    account: Address,
    submitter: Arc<dyn Submitter>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session for a connected account.
    ///
    /// The zero placeholder address some wallets report before unlock is
    /// rejected here, before any batch is built or any network call made.
    pub fn connect(account: Address, submitter: Arc<dyn Submitter>) -> Result<Self> {
        if account.is_zero() {
            return Err(AppError::NotConnected);
        }
        Ok(Self { account, submitter })
    }

    pub fn account(&self) -> Address {
        self.account
    }

    /// Submit a batch for this session's account.
    pub async fn execute(&self, batch: &TransactionBatch) -> Result<String> {
        info!(
            account = %self.account,
            call_count = batch.len(),
            "Submitting transaction batch"
        );
        self.submitter.execute(self.account, batch).await
    }
}

#[derive(Deserialize)]
struct ExecuteResponse {
    transaction_hash: String,
}

#[async_trait]
impl Submitter for RpcClient {
    async fn execute(&self, account: Address, batch: &TransactionBatch) -> Result<String> {
        let response: ExecuteResponse = self
            .request(
                "forge_execute",
                json!({
                    "account": account.to_hex(),
                    "calls": batch.calls(),
                }),
            )
            .await?;
        Ok(response.transaction_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use primitive_types::U256;

    struct RecordingSubmitter {
        batches: Mutex<Vec<(Address, usize)>>,
    }

    #[async_trait]
    impl Submitter for RecordingSubmitter {
        async fn execute(&self, account: Address, batch: &TransactionBatch) -> Result<String> {
            self.batches.lock().push((account, batch.len()));
            Ok("0xabc".to_string())
        }
    }

    #[test]
    fn test_connect_rejects_zero_address() {
        let submitter = Arc::new(RecordingSubmitter {
            batches: Mutex::new(Vec::new()),
        });
        let err = Session::connect(Address::ZERO, submitter).unwrap_err();
        assert!(matches!(err, AppError::NotConnected));
    }

    #[tokio::test]
    async fn test_execute_routes_through_submitter() {
        let submitter = Arc::new(RecordingSubmitter {
            batches: Mutex::new(Vec::new()),
        });
        let account = Address::parse("0x3").unwrap();
        let session = Session::connect(account, submitter.clone()).unwrap();

        let batch = TransactionBatch::supply_liquidity(
            Address::parse("0x7").unwrap(),
            Address::parse("0x9").unwrap(),
            "1",
            U256::from(1u8),
        );
        let hash = session.execute(&batch).await.unwrap();

        assert_eq!(hash, "0xabc");
        assert_eq!(*submitter.batches.lock(), vec![(account, 2)]);
    }

    #[test]
    fn test_session_status_accessors() {
        let addr = Address::parse("0x3").unwrap();
        assert!(SessionStatus::Connected(addr).is_connected());
        assert_eq!(SessionStatus::Connected(addr).account(), Some(addr));
        assert_eq!(SessionStatus::Disconnected.account(), None);
        assert!(!SessionStatus::Connecting.is_connected());
    }
}
