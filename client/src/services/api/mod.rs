//! # Typed Protocol API
//!
//! Read wrappers, the market formatter, dashboard aggregators, token
//! queries, and the write flows that build and submit call batches.

pub mod market;
pub mod token;
pub mod tx;

pub use market::{
    format_market, get_current_twa, get_market, get_market_dashboard, get_pool_analytics,
    get_protocol_config, get_swap, get_swap_dashboard, get_swap_health, get_swap_quote,
    get_trade_preview, RawMarket,
};
pub use token::get_token_balance;
pub use tx::{approve_and_buy_swap, approve_and_supply_lp, mint_mock_token, OpenSwapRequest};

use lib_chain::{scale, Address, SwapSide, U256, WireU256};
use shared::dto::market::{MarketView, ProtocolConfigView};
use shared::dto::trade::{
    HealthStatus, MarketDashboard, PoolAnalytics, SwapDashboard, SwapQuote, SwapView,
    TokenAmount, TokenBalance, TradePreview,
};

use crate::core::error::Result;
use crate::core::service::ProtocolService;
use crate::services::rpc::RpcClient;

/// Decode a wire amount into its exact decimal string plus display value.
pub(crate) fn token_amount(wire: &WireU256, decimals: u8) -> TokenAmount {
    let base = wire.to_u256();
    TokenAmount {
        base_units: base.to_string(),
        formatted: scale::to_human(base, decimals),
    }
}

// Implement ProtocolService for RpcClient by delegating to the typed
// endpoint functions, so tasks and tests can depend on the trait alone.
#[async_trait::async_trait]
impl ProtocolService for RpcClient {
    async fn get_market(&self, pair_id: &str) -> Result<MarketView> {
        market::get_market(self, pair_id).await
    }

    async fn get_pool_analytics(&self, pair_id: &str) -> Result<PoolAnalytics> {
        market::get_pool_analytics(self, pair_id).await
    }

    async fn get_protocol_config(&self) -> Result<ProtocolConfigView> {
        market::get_protocol_config(self).await
    }

    async fn get_swap(&self, swap_id: U256, decimals: u8) -> Result<SwapView> {
        market::get_swap(self, swap_id, decimals).await
    }

    async fn get_swap_health(&self, swap_id: U256) -> Result<HealthStatus> {
        market::get_swap_health(self, swap_id).await
    }

    async fn get_current_twa(&self, swap_id: U256) -> Result<u64> {
        market::get_current_twa(self, swap_id).await
    }

    async fn get_swap_quote(
        &self,
        pair_id: &str,
        side: SwapSide,
        notional: U256,
        decimals: u8,
    ) -> Result<SwapQuote> {
        market::get_swap_quote(self, pair_id, side, notional, decimals).await
    }

    async fn get_token_balance(&self, token: Address, account: Address) -> Result<TokenBalance> {
        token::get_token_balance(self, token, account).await
    }

    async fn get_market_dashboard(&self, pair_id: &str) -> Result<MarketDashboard> {
        market::get_market_dashboard(self, pair_id).await
    }

    async fn get_trade_preview(
        &self,
        pair_id: &str,
        side: SwapSide,
        notional: U256,
    ) -> Result<TradePreview> {
        market::get_trade_preview(self, pair_id, side, notional).await
    }

    async fn get_swap_dashboard(&self, swap_id: U256, decimals: u8) -> Result<SwapDashboard> {
        market::get_swap_dashboard(self, swap_id, decimals).await
    }
}
