//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and
//! modularity. The fetch tasks in [`crate::app::tasks`] depend on these
//! traits rather than on the concrete RPC client, so tests can drive them
//! with canned data.

use async_trait::async_trait;

use lib_chain::{Address, SwapSide, U256};
use shared::dto::market::{MarketView, ProtocolConfigView};
use shared::dto::trade::{
    HealthStatus, MarketDashboard, PoolAnalytics, SwapDashboard, SwapQuote, SwapView,
    TokenBalance, TradePreview,
};

use crate::core::error::Result;

/// Read surface of the protocol.
///
/// One method per read entrypoint, plus the aggregated dashboard bundles.
/// Implemented by the RPC-backed client and by mocks in tests.
#[async_trait]
pub trait ProtocolService: Send + Sync {
    /// Formatted market snapshot for a pair.
    async fn get_market(&self, pair_id: &str) -> Result<MarketView>;

    /// Pool analytics for a pair.
    async fn get_pool_analytics(&self, pair_id: &str) -> Result<PoolAnalytics>;

    /// Protocol-level configuration.
    async fn get_protocol_config(&self) -> Result<ProtocolConfigView>;

    /// Full swap struct by id. `decimals` are the swap market's decimals.
    async fn get_swap(&self, swap_id: U256, decimals: u8) -> Result<SwapView>;

    /// Health / liquidation status for a swap.
    async fn get_swap_health(&self, swap_id: U256) -> Result<HealthStatus>;

    /// Current time-weighted rate for a swap, in basis points.
    async fn get_current_twa(&self, swap_id: U256) -> Result<u64>;

    /// On-chain quote for a side and base-unit notional.
    async fn get_swap_quote(
        &self,
        pair_id: &str,
        side: SwapSide,
        notional: U256,
        decimals: u8,
    ) -> Result<SwapQuote>;

    /// ERC-20 balance and decimals for an account.
    async fn get_token_balance(&self, token: Address, account: Address) -> Result<TokenBalance>;

    /// Market page bundle: market + analytics, fetched concurrently.
    async fn get_market_dashboard(&self, pair_id: &str) -> Result<MarketDashboard>;

    /// Trade preview bundle: market + quote, fetched concurrently.
    async fn get_trade_preview(
        &self,
        pair_id: &str,
        side: SwapSide,
        notional: U256,
    ) -> Result<TradePreview>;

    /// Swap position bundle: swap + health + TWA, fetched concurrently.
    async fn get_swap_dashboard(&self, swap_id: U256, decimals: u8) -> Result<SwapDashboard>;
}
