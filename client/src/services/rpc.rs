//! # RPC Client
//!
//! JSON-RPC 2.0 client for the chain endpoint. This is the only module
//! that talks to the network; every typed read in
//! [`crate::services::api`] goes through [`RpcClient::call_as`], and every
//! submission goes through the [`Submitter`](crate::services::session::Submitter)
//! implementation here.
//!
//! The endpoint surface is fixed:
//!
//! - `forge_call` - state-less contract read
//! - `forge_getLatestBlock` - block number and chain timestamp
//! - `forge_execute` - atomic multicall submission for an account

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use lib_chain::{Address, BlockTimestamp};

use crate::core::config::Config;
use crate::core::error::{AppError, Result};

/// Request timeout; prevents a dead endpoint from freezing the caller.
const RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the chain RPC endpoint.
///
/// Maintains a connection pool; cheap to share behind an `Arc`.
pub struct RpcClient {
    http: Client,
    config: Config,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Latest block header, the source of calldata timestamps.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BlockHeader {
    pub block_number: u64,
    /// Chain clock, seconds.
    pub timestamp: u64,
}

impl RpcClient {
    /// Create a new RPC client for a validated configuration.
    pub fn new(config: Config) -> Self {
        let http = Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One JSON-RPC round trip. Remote failures are propagated with the
    /// underlying message; there is no retry at this layer.
    #[tracing::instrument(skip(self, params), fields(method = %method))]
    pub(crate) async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let start = Instant::now();

        let response = self
            .http
            .post(&self.config.rpc_url)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "RPC network error");
                AppError::Rpc(format!("Network error: {}", e))
            })?;

        let status = response.status();
        let duration = start.elapsed();

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "RPC endpoint returned non-success status"
            );
            return Err(AppError::Rpc(format!("RPC endpoint returned {}", status)));
        }

        let envelope: RpcResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "RPC response parse error");
            AppError::Rpc(format!("Failed to parse response: {}", e))
        })?;

        if let Some(err) = envelope.error {
            tracing::warn!(
                code = err.code,
                message = %err.message,
                duration_ms = duration.as_millis(),
                "RPC call failed"
            );
            return Err(AppError::Rpc(err.message));
        }

        let result = envelope
            .result
            .ok_or_else(|| AppError::Rpc("RPC response missing result".to_string()))?;

        tracing::debug!(duration_ms = duration.as_millis(), "RPC call succeeded");

        serde_json::from_value(result)
            .map_err(|e| AppError::Rpc(format!("Failed to parse response: {}", e)))
    }

    /// Read a contract entrypoint and deserialize the result.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        contract: Address,
        entrypoint: &str,
        calldata: Vec<String>,
    ) -> Result<T> {
        self.request(
            "forge_call",
            json!({
                "contract_address": contract.to_hex(),
                "entry_point": entrypoint,
                "calldata": calldata,
            }),
        )
        .await
    }

    /// Latest block header.
    pub async fn latest_block(&self) -> Result<BlockHeader> {
        self.request("forge_getLatestBlock", json!([])).await
    }

    /// The chain's own clock, for calldata timestamps.
    ///
    /// Local wall clocks never reach calldata; they drift from the
    /// contract's time representation and can overflow its unit.
    pub async fn chain_timestamp(&self) -> Result<BlockTimestamp> {
        let block = self.latest_block().await?;
        Ok(BlockTimestamp::from_block(block.timestamp))
    }
}
