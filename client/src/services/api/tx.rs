//! # Write Flows
//!
//! Builds one ordered call batch per user intent and submits it through
//! the session. Every amount entering calldata goes through the integer
//! base-unit path; precision and range failures are rejected here, before
//! any network call.

use lib_chain::{scale, Address, OracleRefresh, SwapIntent, SwapSide, TransactionBatch};

use crate::core::error::{AppError, Result};
use crate::services::rpc::RpcClient;
use crate::services::session::Session;

/// Rate published with an oracle refresh tick, in basis points.
///
/// Matches the rate the protocol's integration environment seeds; a
/// production oracle ignores the pushed value and re-derives it.
pub const DEFAULT_ORACLE_RATE_BPS: u64 = 500;

/// Whole tokens minted per faucet request.
const FAUCET_MINT_WHOLE_TOKENS: u64 = 10_000;

/// Parameters for opening a swap position.
#[derive(Debug, Clone)]
pub struct OpenSwapRequest {
    /// Collateral token of the market.
    pub token: Address,
    pub pair_id: String,
    pub side: SwapSide,
    /// Human-decimal notional exposure.
    pub notional: f64,
    /// Human-decimal collateral amount.
    pub collateral: f64,
    /// Maximum acceptable rate, bps (slippage bound).
    pub max_rate_bps: u64,
    /// The market's decimals.
    pub decimals: u8,
    /// Prepend an oracle tick when the on-chain rate is stale.
    pub refresh_oracle: bool,
}

/// Supply LP collateral: approve then supply, one atomic batch.
#[tracing::instrument(skip(client, session), fields(pair_id = %pair_id, amount))]
pub async fn approve_and_supply_lp(
    client: &RpcClient,
    session: &Session,
    token: Address,
    pair_id: &str,
    amount: f64,
    decimals: u8,
) -> Result<String> {
    let base_units = scale::to_base_units(amount, decimals)?;
    let batch = TransactionBatch::supply_liquidity(
        token,
        client.config().protocol_address,
        pair_id,
        base_units,
    );
    session.execute(&batch).await
}

/// Open a swap position: optional oracle refresh, approve, buy, one
/// atomic batch.
///
/// The refresh timestamp is read from the latest block - the chain's own
/// clock - never from the local wall clock.
#[tracing::instrument(skip(client, session, request), fields(pair_id = %request.pair_id))]
pub async fn approve_and_buy_swap(
    client: &RpcClient,
    session: &Session,
    request: OpenSwapRequest,
) -> Result<String> {
    let intent = SwapIntent {
        pair_id: request.pair_id.clone(),
        side: request.side,
        notional: scale::to_base_units(request.notional, request.decimals)?,
        collateral: scale::to_base_units(request.collateral, request.decimals)?,
        max_rate_bps: request.max_rate_bps,
    };

    let refresh = if request.refresh_oracle {
        let at = client.chain_timestamp().await?;
        Some(OracleRefresh {
            oracle: client.config().oracle_address,
            rate_bps: DEFAULT_ORACLE_RATE_BPS,
            at,
        })
    } else {
        None
    };

    let batch = TransactionBatch::open_swap(
        request.token,
        client.config().protocol_address,
        &intent,
        refresh,
    );
    session.execute(&batch).await
}

/// Faucet mint of 10,000 whole tokens to the session account.
///
/// Test environments only; requires the mock token address in config.
pub async fn mint_mock_token(client: &RpcClient, session: &Session, decimals: u8) -> Result<String> {
    let token = client.config().mock_token_address.ok_or_else(|| {
        AppError::Validation("RATEFORGE_MOCK_TOKEN_ADDRESS is not configured".to_string())
    })?;

    let amount = scale::whole_to_base_units(FAUCET_MINT_WHOLE_TOKENS, decimals)?;
    let batch = TransactionBatch::mint_mock_token(token, session.account(), amount);
    session.execute(&batch).await
}
